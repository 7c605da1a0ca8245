mod helpers;
mod login;
mod post;
mod rate_limit;
mod register;
