// Handlers grouped by audience:
// content and checkout are public, session covers the admin gate,
// admin holds the token-protected CRUD endpoints.
pub mod admin;
pub mod checkout;
pub mod content;
pub mod health;
pub mod session;
