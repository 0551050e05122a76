//! The contract between the game core and whatever hosts it.
//!
//! The core never touches a screen directly. It asks a [`Canvas`] to draw
//! sprites and pushes score changes into a [`ScoreDisplay`].

/// Every image the core can ask to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    EnemyBug,
    CharBoy,
    CharCatGirl,
    CharHornGirl,
    CharPinkGirl,
    CharPrincessGirl,
    GemBlue,
    GemGreen,
    GemOrange,
}

impl Sprite {
    /// Asset identifier the host resolves to an image.
    pub fn id(self) -> &'static str {
        match self {
            Sprite::EnemyBug => "images/enemy-bug.png",
            Sprite::CharBoy => "images/char-boy.png",
            Sprite::CharCatGirl => "images/char-cat-girl.png",
            Sprite::CharHornGirl => "images/char-horn-girl.png",
            Sprite::CharPinkGirl => "images/char-pink-girl.png",
            Sprite::CharPrincessGirl => "images/char-princess-girl.png",
            Sprite::GemBlue => "images/Gem-Blue.png",
            Sprite::GemGreen => "images/Gem-Green.png",
            Sprite::GemOrange => "images/Gem-Orange.png",
        }
    }
}

/// Immediate-mode drawing surface. Missing assets are the host's problem.
pub trait Canvas {
    fn draw_sprite(&mut self, sprite: Sprite, x: i32, y: i32);
}

/// Sink for the current score. Called after every score change.
pub trait ScoreDisplay {
    fn show(&mut self, value: i64);
}

/// A display that drops every update, for headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDisplay;

impl ScoreDisplay for NullDisplay {
    fn show(&mut self, _value: i64) {}
}
