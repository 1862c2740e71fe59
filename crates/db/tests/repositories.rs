//! Repository tests against a live PostgreSQL database.
//!
//! Run with `DATABASE_URL` pointing at a server where the test user may
//! create databases, then `cargo test -p cardvault-db -- --ignored`.

use cardvault_core::card::CardRecord;
use cardvault_db::models::card::CreateCollectionEntry;
use cardvault_db::models::user::CreateUser;
use cardvault_db::repositories::{CardRepo, UserRepo};
use sqlx::PgPool;

fn record(id: &str, price: f64) -> CardRecord {
    CardRecord {
        id: id.to_string(),
        name: "Charizard".into(),
        set_name: "Base".into(),
        set_id: "base1".into(),
        rarity: "Rare Holo".into(),
        variant_number: "4".into(),
        image_url: "https://images.pokemontcg.io/base1/4_hires.png".into(),
        market_price: price,
    }
}

async fn create_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
        },
    )
    .await
    .expect("user creation should succeed")
    .id
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL server via DATABASE_URL"]
async fn duplicate_email_violates_unique_constraint(pool: PgPool) {
    create_user(&pool, "ash@pallet.town").await;

    let err = UserRepo::create(
        &pool,
        &CreateUser {
            email: "ash@pallet.town".into(),
            password_hash: "x".into(),
        },
    )
    .await
    .unwrap_err();

    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("uq_users_email"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL server via DATABASE_URL"]
async fn collection_is_scoped_to_owner(pool: PgPool) {
    let ash = create_user(&pool, "ash@pallet.town").await;
    let gary = create_user(&pool, "gary@pallet.town").await;

    for (owner, id) in [(ash, "base1-4"), (ash, "base1-2"), (gary, "base1-15")] {
        CardRepo::create(
            &pool,
            &CreateCollectionEntry {
                owner_id: owner,
                record: record(id, 10.0),
                video_id: None,
                video_timestamp: None,
            },
        )
        .await
        .expect("insert should succeed");
    }

    let ash_cards = CardRepo::list_by_owner(&pool, ash).await.unwrap();
    assert_eq!(ash_cards.len(), 2);
    assert!(ash_cards.iter().all(|c| c.owner_id == ash));

    let gary_cards = CardRepo::list_by_owner(&pool, gary).await.unwrap();
    assert_eq!(gary_cards.len(), 1);
    assert_eq!(gary_cards[0].card_id, "base1-15");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL server via DATABASE_URL"]
async fn notion_page_id_is_attached_once(pool: PgPool) {
    let owner = create_user(&pool, "misty@cerulean.city").await;
    let entry = CardRepo::create(
        &pool,
        &CreateCollectionEntry {
            owner_id: owner,
            record: record("base1-2", 55.5),
            video_id: Some("clip.mp4".into()),
            video_timestamp: Some("1532.0".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(entry.notion_page_id, None);
    assert_eq!(entry.market_price, 55.5);
    assert_eq!(entry.video_id.as_deref(), Some("clip.mp4"));

    let updated = CardRepo::set_notion_page_id(&pool, entry.id, "page-1")
        .await
        .unwrap()
        .expect("first attach should update the row");
    assert_eq!(updated.notion_page_id.as_deref(), Some("page-1"));

    let second = CardRepo::set_notion_page_id(&pool, entry.id, "page-2")
        .await
        .unwrap();
    assert!(second.is_none(), "mirror id must not be overwritten");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL server via DATABASE_URL"]
async fn negative_price_is_rejected_by_schema(pool: PgPool) {
    let owner = create_user(&pool, "brock@pewter.city").await;
    let result = CardRepo::create(
        &pool,
        &CreateCollectionEntry {
            owner_id: owner,
            record: record("base1-1", -1.0),
            video_id: None,
            video_timestamp: None,
        },
    )
    .await;
    assert!(result.is_err());
}
