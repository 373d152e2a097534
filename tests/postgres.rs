//! End-to-end checks against a live PostgreSQL. Skipped unless `TEST_DATABASE_URL` is set.

use emptytomb_catalog::model::{self, Commentary, Organization, Pastor, Record};
use emptytomb_catalog::{
    apply_migrations, connect, EntityService, MatchPolicy, PgRepository, Repository, ServiceError, ServiceOptions,
    Settings,
};
use serde_json::Value;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::OnceCell;

static MIGRATED: OnceCell<()> = OnceCell::const_new();

async fn pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let settings = Settings {
        database_url: url,
        ..Settings::default()
    };
    let pool = connect(&settings).await.expect("connect");
    MIGRATED
        .get_or_init(|| async { apply_migrations(&pool, &model::all()).await.expect("migrate") })
        .await;
    Some(pool)
}

fn service<R: Record>(pool: &PgPool, options: ServiceOptions) -> EntityService<R> {
    EntityService::new(Arc::new(PgRepository::<R>::new(pool.clone())), options)
}

fn new_id(ack: &str) -> i32 {
    serde_json::from_str::<Value>(ack).unwrap()["id"].as_i64().unwrap() as i32
}

#[tokio::test]
async fn organization_lifecycle() {
    let Some(pool) = pool().await else { return };
    let svc = service::<Organization>(&pool, ServiceOptions::default());

    let id = new_id(
        &svc.add(r#"{"name":"Grace Church","city":"Winnipeg","yearStarted":1990}"#)
            .await
            .unwrap(),
    );
    let got: Organization = serde_json::from_str(&svc.get(id).await.unwrap()).unwrap();
    assert_eq!(got.name.as_deref(), Some("Grace Church"));
    assert_eq!(got.year_started, 1990);
    assert_eq!(got.membership_size, 0);
    assert_eq!(got.country, None);

    svc.update(&format!(r#"{{"id":{},"name":"Grace Chapel"}}"#, id))
        .await
        .unwrap();
    let got: Organization = serde_json::from_str(&svc.get(id).await.unwrap()).unwrap();
    assert_eq!(got.name.as_deref(), Some("Grace Chapel"));
    assert_eq!(got.city, None);
    assert_eq!(got.year_started, 0);

    let listed: Vec<Organization> = serde_json::from_str(&svc.list().await.unwrap()).unwrap();
    assert!(listed.iter().any(|o| o.id == id));

    svc.delete(id).await.unwrap();
    assert_eq!(svc.get(id).await.unwrap(), "null");
}

#[tokio::test]
async fn binary_and_foreign_key_round_trip() {
    let Some(pool) = pool().await else { return };
    let orgs = PgRepository::<Organization>::new(pool.clone());
    let church = orgs.add(&Organization::default()).await.unwrap();

    let pastors = service::<Pastor>(&pool, ServiceOptions::default());
    let body = format!(r#"{{"churchId":{},"name":"Ann","picture":[0,255,16]}}"#, church);
    let id = new_id(&pastors.add(&body).await.unwrap());
    let got: Pastor = serde_json::from_str(&pastors.get(id).await.unwrap()).unwrap();
    assert_eq!(got.church_id, Some(church));
    assert_eq!(got.picture, Some(vec![0, 255, 16]));

    pastors.delete(id).await.unwrap();
    orgs.delete(church).await.unwrap();
}

#[tokio::test]
async fn dangling_reference_is_a_conflict() {
    let Some(pool) = pool().await else { return };
    let svc = service::<Commentary>(&pool, ServiceOptions::default());
    let err = svc.add(r#"{"personalityId":2147483000,"text":"orphan"}"#).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)), "{:?}", err);
}

#[tokio::test]
async fn strict_policy_reports_missing_row() {
    let Some(pool) = pool().await else { return };
    let svc = service::<Organization>(
        &pool,
        ServiceOptions {
            match_policy: MatchPolicy::Strict,
            ..ServiceOptions::default()
        },
    );
    assert!(matches!(svc.delete(2147483000).await, Err(ServiceError::NotFound(_))));
    let lenient = service::<Organization>(&pool, ServiceOptions::default());
    assert!(lenient.delete(2147483000).await.is_ok());
}
