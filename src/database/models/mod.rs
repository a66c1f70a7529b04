pub mod bio;
pub mod event;
pub mod inventory;
pub mod order;
pub mod song;
pub mod video;

pub use bio::{Bio, NewBio};
pub use event::{Event, NewEvent};
pub use inventory::{InventoryItem, NewInventoryItem};
pub use order::Order;
pub use song::{NewSong, Song};
pub use video::{NewVideo, Video};
