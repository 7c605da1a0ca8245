mod comment;
mod post;
mod user;

use sqlx::{Postgres, Transaction};

pub use comment::*;
pub use post::*;
pub use user::*;

pub type PgTransaction = Transaction<'static, Postgres>;
