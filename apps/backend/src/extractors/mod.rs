pub mod match_id;
pub mod player_cookie;

pub use match_id::MatchPath;
pub use player_cookie::{PlayerCookie, PLAYER_COOKIE};
