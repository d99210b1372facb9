use sqlx::PgPool;

use crate::config;
use crate::error::ApiError;
use crate::models::{Role, User};
use crate::services::items::{CreateItemInput, ItemsService};
use crate::services::list_items::{CreateListItemInput, ListItemsService};
use crate::services::lists::{CreateListInput, ListsService};
use crate::services::users::{SignupInput, UsersService};

/// (email, full name, password, roles)
const SEED_USERS: &[(&str, &str, &str, &[Role])] = &[
    ("admin@listkeeper.dev", "Ada Admin", "Abc123!cd", &[Role::Admin, Role::SuperUser]),
    ("norma@listkeeper.dev", "Norma Normal", "Abc123!cd", &[Role::User]),
    ("melissa@listkeeper.dev", "Melissa Flores", "Abc123!cd", &[Role::User]),
];

const SEED_ITEMS: &[&str] = &[
    "Milk", "Bread", "Eggs", "Coffee", "Butter", "Cheese", "Apples", "Rice", "Pasta", "Tomatoes",
];

const SEED_LISTS: &[&str] = &["Groceries", "Hardware store", "Birthday party"];

/// One-shot destructive reset and reload of sample data. Disabled in
/// production. Rows are created sequentially through the entity services,
/// never concurrently, so seeding cannot race itself on shared data.
pub struct SeedService {
    pool: PgPool,
}

impl SeedService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn execute(&self) -> Result<bool, ApiError> {
        if config::config().is_production() {
            return Err(ApiError::forbidden(
                "You cannot seed the database in production mode",
            ));
        }

        self.purge().await?;

        let users = self.load_users().await?;
        let items = self.load_items(&users).await?;
        let lists = self.load_lists(&users).await?;
        self.load_list_items(&lists, &items).await?;

        tracing::info!(
            "Seeded {} users, {} items, {} lists",
            users.len(),
            items.len(),
            lists.len()
        );
        Ok(true)
    }

    /// Children first so no FK restriction fires.
    async fn purge(&self) -> Result<(), ApiError> {
        for table in ["list_items", "lists", "items", "users"] {
            sqlx::query(&format!("DELETE FROM \"{}\"", table))
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    async fn load_users(&self) -> Result<Vec<User>, ApiError> {
        let service = UsersService::new(self.pool.clone());
        let mut users = vec![];

        for (email, full_name, password, roles) in SEED_USERS {
            let user = service
                .create(SignupInput {
                    email: email.to_string(),
                    password: password.to_string(),
                    full_name: full_name.to_string(),
                })
                .await?;

            // Signup always assigns the plain user role; elevated seed roles
            // are applied directly.
            let role_names: Vec<String> = roles.iter().map(|r| r.as_str().to_string()).collect();
            let user = sqlx::query_as::<_, User>(
                "UPDATE users SET roles = $1 WHERE id = $2 RETURNING *",
            )
            .bind(role_names)
            .bind(user.id)
            .fetch_one(&self.pool)
            .await?;

            users.push(user);
        }

        Ok(users)
    }

    async fn load_items(
        &self,
        users: &[User],
    ) -> Result<Vec<crate::models::Item>, ApiError> {
        let service = ItemsService::new(self.pool.clone());
        let mut items = vec![];

        for (index, name) in SEED_ITEMS.iter().enumerate() {
            let owner = &users[index % users.len()];
            items.push(
                service
                    .create(CreateItemInput { name: name.to_string() }, owner)
                    .await?,
            );
        }

        Ok(items)
    }

    async fn load_lists(
        &self,
        users: &[User],
    ) -> Result<Vec<crate::models::List>, ApiError> {
        let service = ListsService::new(self.pool.clone());
        let mut lists = vec![];

        for (index, name) in SEED_LISTS.iter().enumerate() {
            let owner = &users[index % users.len()];
            lists.push(
                service
                    .create(CreateListInput { name: name.to_string() }, owner)
                    .await?,
            );
        }

        Ok(lists)
    }

    async fn load_list_items(
        &self,
        lists: &[crate::models::List],
        items: &[crate::models::Item],
    ) -> Result<(), ApiError> {
        let service = ListItemsService::new(self.pool.clone());

        for list in lists {
            for (index, item) in items.iter().enumerate() {
                service
                    .create(CreateListItemInput {
                        quantity: (index % 10) as i32,
                        completed: index % 2 == 0,
                        list_id: list.id,
                        item_id: item.id,
                    })
                    .await?;
            }
        }

        Ok(())
    }
}
