mod check;
mod dump;

pub use check::{check, CheckArgs};
pub use dump::{dump, DumpArgs};
