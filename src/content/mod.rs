pub mod model;
pub mod store;

pub use model::{Animal, Content, Question};
pub use store::{ContentStore, RetrieveContent};
