mod login;
mod register;
mod routes;

pub use login::*;
pub use register::*;
pub use routes::*;
