mod comment;

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version};
use secrecy::Secret;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::sync::OnceLock;
use threadhub::configuration::{self, DatabaseConfigs, RateLimitConfigs};
use threadhub::startup::{self, Application};
use threadhub::telemetry;
use uuid::Uuid;

#[derive(Debug)]
pub struct TestUser {
    pub user_id: Uuid,
    pub user_name: String,
    pub password: String,
    pub email: String,
}

impl TestUser {
    pub fn generate() -> Self {
        Self {
            user_id: Uuid::new_v4(),
            user_name: Uuid::new_v4().to_string(),
            password: Uuid::new_v4().to_string(),
            email: format!("{}@example.com", Uuid::new_v4()),
        }
    }

    pub async fn store(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        // Cheap parameters; the stored PHC string carries them for verification
        let test_params = Params::new(100, 1, 1, None).unwrap();
        let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, test_params)
            .hash_password(self.password.as_bytes(), &salt)
            .unwrap()
            .to_string();

        sqlx::query(
            r#"
            INSERT INTO users (id, user_name, password_hash, email)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(self.user_id)
        .bind(&self.user_name)
        .bind(password_hash)
        .bind(&self.email)
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub test_user: TestUser,
    pub api_client: reqwest::Client,
}

static TRACING: OnceLock<()> = OnceLock::new();

pub fn init_tracing() {
    TRACING.get_or_init(|| {
        let default_filter_level = "info".to_string();
        let subscriber_name = "test".to_string();

        if std::env::var("TEST_LOG").is_ok() {
            let subscriber =
                telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
            telemetry::init_subscriber(subscriber);
        } else {
            let subscriber =
                telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::sink);
            telemetry::init_subscriber(subscriber);
        };
    });
}

pub async fn spawn_app() -> TestApp {
    // Generous budget so ordinary tests never trip the limiter
    spawn_app_with_comment_limit(1_000).await
}

pub async fn spawn_app_with_comment_limit(max_comments: u64) -> TestApp {
    spawn_app_with_rate_limit(RateLimitConfigs {
        max_comments,
        ..RateLimitConfigs::default()
    })
    .await
}

pub async fn spawn_app_with_rate_limit(rate_limit: RateLimitConfigs) -> TestApp {
    init_tracing();

    let configuration = {
        let mut c = configuration::get_config().expect("Failed to read configuration.");
        c.database.database_name = Uuid::new_v4().to_string();
        c.application.port = 0;
        c.rate_limit = rate_limit;
        c
    };

    configure_database(&configuration.database).await;

    let application = Application::build(configuration.clone())
        .await
        .expect("Failed to build application.");
    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    let client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap();

    let test_app = TestApp {
        address: format!("http://localhost:{application_port}"),
        db_pool: startup::get_connection_pool(&configuration.database),
        test_user: TestUser::generate(),
        api_client: client,
    };

    test_app
        .test_user
        .store(&test_app.db_pool)
        .await
        .expect("Failed to store test user");

    test_app
}

async fn configure_database(config: &DatabaseConfigs) -> PgPool {
    let maintenance_settings = DatabaseConfigs {
        database_name: "postgres".to_string(),
        username: "postgres".to_string(),
        password: Secret::new("password".to_string()),
        ..config.clone()
    };

    let mut connection = PgConnection::connect_with(&maintenance_settings.connect_options())
        .await
        .expect("Failed to connect to Postgres");

    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.database_name).as_str())
        .await
        .expect("Failed to create database.");

    let connection_pool = PgPool::connect_with(config.connect_options())
        .await
        .expect("Failed to connect to Postgres.");

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}
