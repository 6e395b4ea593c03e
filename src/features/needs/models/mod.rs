mod need;

pub use need::{Need, Urgency};
