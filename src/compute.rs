/// Game logic.
///
/// Entities are mutated in place. Anything they share (the player, the
/// score, the random source, the canvas) is handed in by the caller, so
/// there is no global state and tests can drive every path with a seeded
/// RNG.

use rand::Rng;
use tracing::{debug, trace};

use crate::config::GameConfig;
use crate::entities::{
    Character, Collectable, Direction, Enemy, FrameReport, GameState, GemKind, Player, Score,
    CHARACTER_ROW_Y, COLLISION_DISTANCE, ENEMY_BOUNDARY_X, ENEMY_ROWS, ENEMY_SPAWN_X,
    ENEMY_SPEEDS, HOME_X, HOME_Y, LANES, LOSE_POINTS, PLAYER_BOUNDARY_X, PLAYER_BOUNDARY_Y,
    WIN_POINTS, WIN_ROW_Y,
};
use crate::platform::{Canvas, ScoreDisplay, Sprite};

// ── Random selection ──────────────────────────────────────────────────────────

/// Uniformly pick one element. Panics if `items` is empty.
pub fn pick<'a, T>(rng: &mut impl Rng, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

pub fn random_speed(rng: &mut impl Rng) -> f32 {
    *pick(rng, &ENEMY_SPEEDS)
}

pub fn random_enemy_row(rng: &mut impl Rng) -> i32 {
    *pick(rng, &ENEMY_ROWS)
}

pub fn random_lane(rng: &mut impl Rng) -> i32 {
    *pick(rng, &LANES)
}

pub fn random_gem(rng: &mut impl Rng) -> GemKind {
    *pick(rng, &GemKind::ALL)
}

// ── Collision ─────────────────────────────────────────────────────────────────

/// True when two points are within the collision box on both axes.
pub fn within_collision_box(ax: f32, ay: f32, bx: f32, by: f32) -> bool {
    (ay - by).abs() <= COLLISION_DISTANCE && (ax - bx).abs() <= COLLISION_DISTANCE
}

fn touches_player(x: f32, y: i32, player: &Player) -> bool {
    within_collision_box(x, y as f32, player.x as f32, player.y as f32)
}

// ── Score ─────────────────────────────────────────────────────────────────────

impl<D: ScoreDisplay> Score<D> {
    /// Start at zero and show it.
    pub fn new(display: D) -> Self {
        let mut score = Score { value: 0, display };
        score.render();
        score
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Player reached the water.
    pub fn win(&mut self) {
        self.value += WIN_POINTS;
        self.render();
    }

    /// Player was hit. No floor: the score may go negative.
    pub fn lose(&mut self) {
        self.value -= LOSE_POINTS;
        self.render();
    }

    pub fn bonus(&mut self, points: u32) {
        self.value += i64::from(points);
        self.render();
    }

    fn render(&mut self) {
        trace!(score = self.value, "score refreshed");
        self.display.show(self.value);
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

impl Enemy {
    /// A fresh bug just off the left edge, on a random row at a random speed.
    pub fn spawn(rng: &mut impl Rng) -> Self {
        Enemy {
            x: ENEMY_SPAWN_X,
            y: random_enemy_row(rng),
            move_speed: random_speed(rng),
        }
    }

    /// Advance by `dt` seconds, or respawn once past the right edge.
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        debug_assert!(dt >= 0.0, "negative frame time {dt}");
        if self.x <= ENEMY_BOUNDARY_X {
            self.x += self.move_speed * dt;
        } else {
            *self = Enemy::spawn(rng);
            debug!(row = self.y, speed = self.move_speed, "enemy respawned");
        }
    }

    pub fn touches(&self, player: &Player) -> bool {
        touches_player(self.x, self.y, player)
    }

    /// Draw, then check for a hit on the player. A hit costs points and sends
    /// the player home. Returns whether this enemy hit.
    pub fn render(
        &self,
        canvas: &mut impl Canvas,
        player: &mut Player,
        score: &mut Score<impl ScoreDisplay>,
    ) -> bool {
        canvas.draw_sprite(Sprite::EnemyBug, self.x.round() as i32, self.y);

        if !self.touches(player) {
            return false;
        }
        debug!(x = self.x, y = self.y, "player hit");
        score.lose();
        player.reset();
        true
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Player {
            x: HOME_X,
            y: HOME_Y,
            character: Character::Boy,
        }
    }

    /// Back to the home square. The chosen character stays.
    pub fn reset(&mut self) {
        self.x = HOME_X;
        self.y = HOME_Y;
    }

    /// Try to move by `(dx, dy)`. Does nothing on `None`.
    ///
    /// Each axis is checked on its own: a horizontal step that would leave
    /// the board is dropped rather than clamped, and a vertical step past the
    /// bottom is dropped too. Stepping above the top row scores a win and
    /// resets the player instead of moving. Returns whether that happened.
    pub fn update(
        &mut self,
        delta: Option<(i32, i32)>,
        score: &mut Score<impl ScoreDisplay>,
    ) -> bool {
        let Some((dx, dy)) = delta else {
            return false;
        };

        let new_x = self.x + dx;
        if (0..=PLAYER_BOUNDARY_X).contains(&new_x) {
            self.x = new_x;
        }

        let mut reached_goal = false;
        let new_y = self.y + dy;
        if new_y <= PLAYER_BOUNDARY_Y {
            if new_y < WIN_ROW_Y {
                debug!(lane = self.x, "player reached the goal");
                score.win();
                self.reset();
                reached_goal = true;
            } else {
                self.y = new_y;
            }
        }

        debug_assert!((0..=PLAYER_BOUNDARY_X).contains(&self.x), "x out of range: {}", self.x);
        debug_assert!(self.y <= PLAYER_BOUNDARY_Y, "y out of range: {}", self.y);
        reached_goal
    }

    /// One discrete step per input. Unrecognised input (`None`) is ignored.
    pub fn handle_input(
        &mut self,
        input: Option<Direction>,
        score: &mut Score<impl ScoreDisplay>,
    ) -> bool {
        self.update(input.map(Direction::delta), score)
    }

    /// Draw the character picker along the bottom row, then the player.
    ///
    /// The character only follows the lane while the player stands below the
    /// home row. Out on the board the last pick sticks.
    pub fn render(&mut self, canvas: &mut impl Canvas) {
        for (character, &lane) in Character::ALL.iter().zip(LANES.iter()) {
            canvas.draw_sprite(character.sprite(), lane, CHARACTER_ROW_Y);
        }

        if self.y > HOME_Y {
            if let Some(character) = Character::for_lane(self.x) {
                self.character = character;
            }
        }
        canvas.draw_sprite(self.character.sprite(), self.x, self.y);
    }
}

// ── Collectable ───────────────────────────────────────────────────────────────

impl Collectable {
    pub fn spawn(rng: &mut impl Rng) -> Self {
        Collectable {
            x: random_lane(rng),
            y: random_enemy_row(rng),
            gem: random_gem(rng),
        }
    }

    /// Move to a new random cell with a new random gem. Either may repeat.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        *self = Collectable::spawn(rng);
    }

    pub fn touches(&self, player: &Player) -> bool {
        touches_player(self.x as f32, self.y, player)
    }

    /// Check for a pickup first, then draw wherever the gem now is. Returns
    /// the points collected, if any.
    pub fn render(
        &mut self,
        canvas: &mut impl Canvas,
        player: &Player,
        score: &mut Score<impl ScoreDisplay>,
        rng: &mut impl Rng,
    ) -> Option<u32> {
        let collected = if self.touches(player) {
            let value = self.gem.value();
            debug!(gem = ?self.gem, value, "gem collected");
            score.bonus(value);
            self.reset(rng);
            Some(value)
        } else {
            None
        };

        canvas.draw_sprite(self.gem.sprite(), self.x, self.y);
        collected
    }
}

// ── Game state ────────────────────────────────────────────────────────────────

impl<D: ScoreDisplay, R: Rng> GameState<D, R> {
    /// Wire up a new game: `config.enemy_count` bugs, a player at home, a
    /// zero score and one gem.
    pub fn new(config: &GameConfig, display: D, mut rng: R) -> Self {
        let enemies = (0..config.enemy_count)
            .map(|_| Enemy::spawn(&mut rng))
            .collect();
        let collectable = Collectable::spawn(&mut rng);
        debug!(enemies = config.enemy_count, "game initialised");

        GameState {
            enemies,
            player: Player::new(),
            collectable,
            score: Score::new(display),
            rng,
            frame: 0,
        }
    }

    /// Apply one key press to the player. Call between frames.
    pub fn handle_input(&mut self, input: Option<Direction>) -> bool {
        self.player.handle_input(input, &mut self.score)
    }

    /// Move every enemy by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        for enemy in &mut self.enemies {
            enemy.update(dt, &mut self.rng);
        }
    }

    /// Draw every entity in a fixed order (enemies, gem, player), running
    /// each one's collision check on the way.
    pub fn render(&mut self, canvas: &mut impl Canvas) -> FrameReport {
        let mut report = FrameReport::default();

        for enemy in &self.enemies {
            if enemy.render(canvas, &mut self.player, &mut self.score) {
                report.enemy_hits += 1;
            }
        }
        report.gem_collected =
            self.collectable
                .render(canvas, &self.player, &mut self.score, &mut self.rng);
        self.player.render(canvas);

        self.frame += 1;
        report
    }

    /// One full frame: update, then render.
    pub fn frame(&mut self, dt: f32, canvas: &mut impl Canvas) -> FrameReport {
        self.update(dt);
        self.render(canvas)
    }
}
