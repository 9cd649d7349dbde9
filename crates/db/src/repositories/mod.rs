//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_repo;
pub mod category_repo;
pub mod learning_repo;
pub mod note_repo;
pub mod post_repo;
pub mod project_repo;
pub mod search_repo;
pub mod session_repo;

pub use admin_repo::AdminRepo;
pub use category_repo::CategoryRepo;
pub use learning_repo::LearningRepo;
pub use note_repo::NoteRepo;
pub use post_repo::PostRepo;
pub use project_repo::ProjectRepo;
pub use search_repo::SearchRepo;
pub use session_repo::SessionRepo;
