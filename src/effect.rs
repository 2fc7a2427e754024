//! Effects - side effects declared by the reducer

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch species, move and ability names and merge them into a pool
    LoadWords { use_cache: bool },
    /// Download and decode the sprite for this session
    LoadSprite { id: u16, use_cache: bool },
    /// Start the looping background track
    PlayMusic {
        url: String,
        volume: f32,
        use_cache: bool,
    },
}
