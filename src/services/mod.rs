//! Domain services of the Salary Ledger.
//!
//! Each service owns one slice of the domain rules and talks to storage only
//! through the traits in [`crate::store`]. The salary ledger is the core; the
//! directory, attendance book, user directory, token issuer and settings
//! support it.

mod attendance;
mod directory;
mod ledger;
mod password;
mod settings;
mod tokens;
mod users;

pub use attendance::{AttendanceBook, Punch};
pub use directory::Directory;
pub use ledger::SalaryLedger;
pub use password::{hash_password, verify_password};
pub use settings::Settings;
pub use tokens::{Claims, IssuedToken, TokenIssuer};
pub use users::UserDirectory;
