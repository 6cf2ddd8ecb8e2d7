mod common;

use casemgr_backend::types::db::user;
use casemgr_backend::AppData;
use common::setup_app_with_user;

async fn scenario(app: &AppData, name: &str, editor: &user::Model) -> i32 {
    app.scenario_store
        .create_scenario(name, Some(format!("content of {name}")), None, editor.id)
        .await
        .expect("Failed to create scenario")
        .id
}

// ---- follow edges -----------------------------------------------------

#[tokio::test]
async fn follow_then_is_following() {
    let (app, user) = setup_app_with_user().await;
    let s = scenario(&app, "login", &user).await;

    assert!(!app.follow_store.is_following(user.id, s).await.unwrap());
    app.follow_store.follow(user.id, s).await.unwrap();
    assert!(app.follow_store.is_following(user.id, s).await.unwrap());
}

#[tokio::test]
async fn double_follow_produces_exactly_one_edge() {
    let (app, user) = setup_app_with_user().await;
    let s = scenario(&app, "login", &user).await;

    app.follow_store.follow(user.id, s).await.unwrap();
    app.follow_store.follow(user.id, s).await.unwrap();

    let followed = app.follow_store.followed_scenarios(user.id).await.unwrap();
    assert_eq!(followed.len(), 1);
}

#[tokio::test]
async fn unfollow_removes_the_edge_and_tolerates_absence() {
    let (app, user) = setup_app_with_user().await;
    let s = scenario(&app, "login", &user).await;

    // Unfollowing a never-followed pair is a no-op
    app.follow_store.unfollow(user.id, s).await.unwrap();

    app.follow_store.follow(user.id, s).await.unwrap();
    app.follow_store.unfollow(user.id, s).await.unwrap();
    assert!(!app.follow_store.is_following(user.id, s).await.unwrap());
}

#[tokio::test]
async fn followed_scenarios_joins_only_the_users_edges() {
    let (app, alice) = setup_app_with_user().await;
    let bob = app
        .user_store
        .create_user("bob@example.com", "bob", "bobs-password")
        .await
        .unwrap();

    let s1 = scenario(&app, "checkout", &alice).await;
    let s2 = scenario(&app, "signup", &alice).await;
    let s3 = scenario(&app, "billing", &alice).await;

    app.follow_store.follow(alice.id, s1).await.unwrap();
    app.follow_store.follow(alice.id, s3).await.unwrap();
    app.follow_store.follow(bob.id, s2).await.unwrap();

    let mut names: Vec<String> = app
        .follow_store
        .followed_scenarios(alice.id)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    names.sort();
    assert_eq!(names, ["billing", "checkout"]);
}

// ---- rely edges -------------------------------------------------------

#[tokio::test]
async fn rely_is_visible_from_both_directions() {
    let (app, user) = setup_app_with_user().await;
    let a = scenario(&app, "checkout", &user).await;
    let b = scenario(&app, "login", &user).await;

    app.scenario_store.rely(a, b).await.unwrap();

    assert!(app.scenario_store.is_relying(a, b).await.unwrap());
    assert!(app.scenario_store.is_relied_by(b, a).await.unwrap());
    // Direction matters
    assert!(!app.scenario_store.is_relying(b, a).await.unwrap());
}

#[tokio::test]
async fn unrely_clears_both_direction_queries() {
    let (app, user) = setup_app_with_user().await;
    let a = scenario(&app, "checkout", &user).await;
    let b = scenario(&app, "login", &user).await;

    app.scenario_store.rely(a, b).await.unwrap();
    app.scenario_store.unrely(a, b).await.unwrap();

    assert!(!app.scenario_store.is_relying(a, b).await.unwrap());
    assert!(!app.scenario_store.is_relied_by(b, a).await.unwrap());

    // Removing again is a no-op
    app.scenario_store.unrely(a, b).await.unwrap();
}

#[tokio::test]
async fn double_rely_produces_exactly_one_edge() {
    let (app, user) = setup_app_with_user().await;
    let a = scenario(&app, "checkout", &user).await;
    let b = scenario(&app, "login", &user).await;

    app.scenario_store.rely(a, b).await.unwrap();
    app.scenario_store.rely(a, b).await.unwrap();

    let relied = app.scenario_store.relied_scenarios(a).await.unwrap();
    assert_eq!(relied.len(), 1);
    assert_eq!(relied[0].id, b);
}

#[tokio::test]
async fn self_dependency_is_rejected_as_noop() {
    let (app, user) = setup_app_with_user().await;
    let a = scenario(&app, "checkout", &user).await;

    app.scenario_store.rely(a, a).await.unwrap();
    assert!(!app.scenario_store.is_relying(a, a).await.unwrap());
}

#[tokio::test]
async fn mutual_dependency_between_distinct_scenarios_is_permitted() {
    let (app, user) = setup_app_with_user().await;
    let a = scenario(&app, "checkout", &user).await;
    let b = scenario(&app, "login", &user).await;

    app.scenario_store.rely(a, b).await.unwrap();
    app.scenario_store.rely(b, a).await.unwrap();

    assert!(app.scenario_store.is_relying(a, b).await.unwrap());
    assert!(app.scenario_store.is_relying(b, a).await.unwrap());
}

#[tokio::test]
async fn directional_listings_mirror_the_edge_set() {
    let (app, user) = setup_app_with_user().await;
    let a = scenario(&app, "checkout", &user).await;
    let b = scenario(&app, "login", &user).await;
    let c = scenario(&app, "inventory", &user).await;

    app.scenario_store.rely(a, b).await.unwrap();
    app.scenario_store.rely(c, b).await.unwrap();

    let relied = app.scenario_store.relied_scenarios(a).await.unwrap();
    assert_eq!(relied.len(), 1);
    assert_eq!(relied[0].name, "login");

    let mut reliers: Vec<String> = app
        .scenario_store
        .relier_scenarios(b)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    reliers.sort();
    assert_eq!(reliers, ["checkout", "inventory"]);
}

// ---- scenario/case aggregate ------------------------------------------

#[tokio::test]
async fn duplicate_scenario_name_is_rejected() {
    let (app, user) = setup_app_with_user().await;
    scenario(&app, "checkout", &user).await;

    let err = app
        .scenario_store
        .create_scenario("checkout", None, None, user.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        casemgr_backend::errors::InternalError::Uniqueness { .. }
    ));
}

#[tokio::test]
async fn cases_belong_to_their_scenario() {
    let (app, user) = setup_app_with_user().await;
    let s = scenario(&app, "checkout", &user).await;
    let other = scenario(&app, "login", &user).await;

    app.scenario_store
        .create_case(s, Some("happy path".into()), None, user.id)
        .await
        .unwrap();
    app.scenario_store
        .create_case(s, Some("declined card".into()), None, user.id)
        .await
        .unwrap();
    app.scenario_store
        .create_case(other, Some("bad password".into()), None, user.id)
        .await
        .unwrap();

    assert_eq!(app.scenario_store.cases_of(s).await.unwrap().len(), 2);
    assert_eq!(app.scenario_store.cases_of(other).await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_case_is_idempotent() {
    let (app, user) = setup_app_with_user().await;
    let s = scenario(&app, "checkout", &user).await;
    let case = app
        .scenario_store
        .create_case(s, None, None, user.id)
        .await
        .unwrap();

    app.scenario_store.delete_case(case.id).await.unwrap();
    app.scenario_store.delete_case(case.id).await.unwrap();
    assert!(app.scenario_store.cases_of(s).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_scenario_cascades_to_edges_and_cases() {
    let (app, user) = setup_app_with_user().await;
    let doomed = scenario(&app, "doomed", &user).await;
    let upstream = scenario(&app, "upstream", &user).await;
    let downstream = scenario(&app, "downstream", &user).await;

    app.scenario_store.rely(doomed, upstream).await.unwrap();
    app.scenario_store.rely(downstream, doomed).await.unwrap();
    app.follow_store.follow(user.id, doomed).await.unwrap();
    app.scenario_store
        .create_case(doomed, Some("case".into()), None, user.id)
        .await
        .unwrap();

    // Unrelated state that must survive
    app.follow_store.follow(user.id, upstream).await.unwrap();
    app.scenario_store
        .create_case(upstream, Some("kept".into()), None, user.id)
        .await
        .unwrap();

    app.scenario_store.delete_scenario(doomed).await.unwrap();

    assert!(app.scenario_store.find_by_id(doomed).await.unwrap().is_none());
    assert!(!app.scenario_store.is_relied_by(upstream, doomed).await.unwrap());
    assert!(!app.scenario_store.is_relying(downstream, doomed).await.unwrap());
    assert!(!app.follow_store.is_following(user.id, doomed).await.unwrap());
    assert!(app.scenario_store.cases_of(doomed).await.unwrap().is_empty());

    // Unrelated rows untouched
    assert!(app.follow_store.is_following(user.id, upstream).await.unwrap());
    assert_eq!(app.scenario_store.cases_of(upstream).await.unwrap().len(), 1);
}
