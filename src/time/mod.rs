pub mod zones;

pub use zones::{format_local, parse_and_localize, parse_local, utc_to_local, LOCAL_ZONE};
