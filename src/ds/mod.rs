pub mod intrusive_list;
pub mod key_index;
pub mod slot_arena;

pub use intrusive_list::IntrusiveList;
pub use key_index::KeyIndex;
pub use slot_arena::{SlotArena, SlotId};
