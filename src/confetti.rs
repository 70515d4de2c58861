use rand::seq::SliceRandom;
use rand::Rng;

const SYMBOLS: [char; 6] = ['*', '+', '✦', '•', '✧', '◆'];
const GRAVITY: f64 = 12.0;
const STEP_SECS: f64 = 0.1;
/// 3 seconds at the runner's 100ms tick
pub const BURST_TICKS: u32 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
}

impl Piece {
    fn step(&mut self, dt: f64) {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += GRAVITY * dt;
    }
}

/// Burst shown after a correct answer
#[derive(Debug, Default)]
pub struct Confetti {
    pub pieces: Vec<Piece>,
    ticks_left: u32,
    width: f64,
    height: f64,
}

impl Confetti {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.ticks_left > 0
    }

    /// Fire `count` pieces upward from the top-center of a `width` x `height` area
    pub fn launch<R: Rng + ?Sized>(&mut self, width: u16, height: u16, count: usize, rng: &mut R) {
        self.width = width as f64;
        self.height = height as f64;
        self.ticks_left = BURST_TICKS;
        let origin_x = self.width / 2.0;
        let origin_y = (self.height / 4.0).max(1.0);
        self.pieces = (0..count)
            .map(|_| Piece {
                x: origin_x,
                y: origin_y,
                vel_x: rng.gen_range(-12.0..12.0),
                vel_y: rng.gen_range(-10.0..-2.0),
                symbol: *SYMBOLS.choose(rng).unwrap_or(&'*'),
                color_index: rng.gen_range(0..6),
            })
            .collect();
    }

    pub fn update(&mut self) {
        if !self.is_active() {
            return;
        }
        self.ticks_left -= 1;
        if self.ticks_left == 0 {
            self.pieces.clear();
            return;
        }
        let (w, h) = (self.width, self.height);
        self.pieces.retain_mut(|p| {
            p.step(STEP_SECS);
            p.y <= h && p.x >= 0.0 && p.x < w
        });
    }

    pub fn stop(&mut self) {
        self.ticks_left = 0;
        self.pieces.clear();
    }
}
