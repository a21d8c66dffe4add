pub mod db;
pub mod live;

pub use live::{Subscription, VocabStore};
