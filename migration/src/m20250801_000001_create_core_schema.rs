use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Roles table: named permission bitmasks, exactly one marked default
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Roles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Roles::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Roles::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Roles::Permissions)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_roles_is_default")
                    .table(Roles::Table)
                    .col(Roles::IsDefault)
                    .to_owned(),
            )
            .await?;

        // Users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::RoleId).integer().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::Confirmed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::MemberSince).big_integer().not_null())
                    .col(ColumnDef::new(Users::LastSeen).big_integer().not_null())
                    .col(ColumnDef::new(Users::LastInformed).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_role_id")
                            .from(Users::Table, Users::RoleId)
                            .to(Roles::Table, Roles::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_username")
                    .table(Users::Table)
                    .col(Users::Username)
                    .to_owned(),
            )
            .await?;

        // Scenarios table
        manager
            .create_table(
                Table::create()
                    .table(Scenarios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scenarios::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Scenarios::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Scenarios::Content).text().null())
                    .col(ColumnDef::new(Scenarios::Remark).text().null())
                    .col(ColumnDef::new(Scenarios::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Scenarios::EditorId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scenarios_editor_id")
                            .from(Scenarios::Table, Scenarios::EditorId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Cases table: each case belongs to exactly one scenario
        manager
            .create_table(
                Table::create()
                    .table(Cases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cases::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cases::Content).text().null())
                    .col(ColumnDef::new(Cases::Remark).text().null())
                    .col(ColumnDef::new(Cases::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Cases::ScenarioId).integer().not_null())
                    .col(ColumnDef::new(Cases::EditorId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cases_scenario_id")
                            .from(Cases::Table, Cases::ScenarioId)
                            .to(Scenarios::Table, Scenarios::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cases_editor_id")
                            .from(Cases::Table, Cases::EditorId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cases_scenario_id")
                    .table(Cases::Table)
                    .col(Cases::ScenarioId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cases_created_at")
                    .table(Cases::Table)
                    .col(Cases::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Follow edges: (user, scenario) composite key
        manager
            .create_table(
                Table::create()
                    .table(Follows::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Follows::UserId).integer().not_null())
                    .col(ColumnDef::new(Follows::ScenarioId).integer().not_null())
                    .col(ColumnDef::new(Follows::CreatedAt).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_follows")
                            .col(Follows::UserId)
                            .col(Follows::ScenarioId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_follows_user_id")
                            .from(Follows::Table, Follows::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_follows_scenario_id")
                            .from(Follows::Table, Follows::ScenarioId)
                            .to(Scenarios::Table, Scenarios::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_follows_scenario_id")
                    .table(Follows::Table)
                    .col(Follows::ScenarioId)
                    .to_owned(),
            )
            .await?;

        // Rely edges: (relier, relied) composite key, both scenarios
        manager
            .create_table(
                Table::create()
                    .table(Relies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Relies::RelierId).integer().not_null())
                    .col(ColumnDef::new(Relies::ReliedId).integer().not_null())
                    .col(ColumnDef::new(Relies::CreatedAt).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_relies")
                            .col(Relies::RelierId)
                            .col(Relies::ReliedId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_relies_relier_id")
                            .from(Relies::Table, Relies::RelierId)
                            .to(Scenarios::Table, Scenarios::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_relies_relied_id")
                            .from(Relies::Table, Relies::ReliedId)
                            .to(Scenarios::Table, Scenarios::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_relies_relied_id")
                    .table(Relies::Table)
                    .col(Relies::ReliedId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Relies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Follows::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Scenarios::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    Name,
    IsDefault,
    Permissions,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Username,
    RoleId,
    PasswordHash,
    Confirmed,
    MemberSince,
    LastSeen,
    LastInformed,
}

#[derive(DeriveIden)]
enum Scenarios {
    Table,
    Id,
    Name,
    Content,
    Remark,
    CreatedAt,
    EditorId,
}

#[derive(DeriveIden)]
enum Cases {
    Table,
    Id,
    Content,
    Remark,
    CreatedAt,
    ScenarioId,
    EditorId,
}

#[derive(DeriveIden)]
enum Follows {
    Table,
    UserId,
    ScenarioId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Relies {
    Table,
    RelierId,
    ReliedId,
    CreatedAt,
}
