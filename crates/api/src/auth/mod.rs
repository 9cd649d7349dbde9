//! Admin authentication: password hashing, session cookies, and the
//! [`session::SessionAuthenticator`] that ties them to the credential store.

pub mod cookie;
pub mod password;
pub mod session;
