pub use categories::Category;
pub use commands::{CreateTransactionCmd, UpdateTransactionCmd};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder, TransactionSearchFilter};
pub use transactions::{BonusKind, Transaction, TransactionKind};
pub use users::User;

mod categories;
mod commands;
mod error;
mod ops;
mod transactions;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
