use axum_storefront::{
    config::AppConfig,
    db::{OrmConn, create_orm_conn, run_migrations},
    entity::{
        items::{ActiveModel as ItemActive, Column as ItemCol, Entity as Items},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
    models::{ADMIN_STATUS, USER_STATUS},
    services::auth_service::hash_password,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let admin_password = std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into());
    let admin_id = ensure_user(&orm, "admin", "admin@example.com", &admin_password, ADMIN_STATUS).await?;
    let user_id = ensure_user(&orm, "user", "user@example.com", "user123", USER_STATUS).await?;
    seed_items(&orm).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    orm: &OrmConn,
    name: &str,
    email: &str,
    password: &str,
    status: &str,
) -> anyhow::Result<i32> {
    let existing = Users::find()
        .filter(UserCol::Name.eq(name))
        .one(orm)
        .await?;

    // Existing accounts keep their password; only the status is enforced.
    let user = match existing {
        Some(user) => {
            let mut active: UserActive = user.into();
            active.status = Set(status.to_string());
            active.update(orm).await?
        }
        None => {
            let password_hash =
                hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;
            UserActive {
                id: NotSet,
                name: Set(name.to_string()),
                email: Set(email.to_string()),
                password_hash: Set(password_hash),
                status: Set(status.to_string()),
            }
            .insert(orm)
            .await?
        }
    };

    println!("Ensured user {name} (status={status})");
    Ok(user.id)
}

async fn seed_items(orm: &OrmConn) -> anyhow::Result<()> {
    let items = vec![
        ("Ferris Mug", 1200, "Coffee tastes better with Ferris", "Kitchen"),
        ("Axum Hoodie", 5500, "Warm hoodie for Rustaceans", "Clothing"),
        ("Rust Sticker Pack", 500, "Decorate your laptop", "Accessories"),
        ("Crab Socks", 900, "Orange, obviously", "Clothing"),
    ];

    for (title, price, description, category) in items {
        let exists = Items::find()
            .filter(ItemCol::Title.eq(title))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }

        ItemActive {
            id: NotSet,
            title: Set(title.to_string()),
            price: Set(price),
            is_active: Set(true),
            image_path: Set(None),
            description: Set(description.to_string()),
            category: Set(category.to_string()),
        }
        .insert(orm)
        .await?;
    }

    println!("Seeded items");
    Ok(())
}
