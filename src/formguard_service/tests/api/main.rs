mod helpers;
mod login;
