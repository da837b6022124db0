//! Drive a bot across a small grid with a RoverScript program.
//!
//! Run with:
//! ```sh
//! RUST_LOG=rover_eval=trace cargo run --example grid_demo
//! ```

use rover_runtime::{BlockingPacer, BotCapability, Direction, ScriptEngine};
use tracing_subscriber::EnvFilter;

struct ConsoleBot {
    x: i64,
    y: i64,
    direction: Direction,
    size: i64,
}

impl ConsoleBot {
    fn target(&self) -> (i64, i64) {
        match self.direction {
            Direction::North => (self.x, self.y - 1),
            Direction::East => (self.x + 1, self.y),
            Direction::South => (self.x, self.y + 1),
            Direction::West => (self.x - 1, self.y),
        }
    }

    fn apply(&mut self, (x, y): (i64, i64)) -> bool {
        if x < 0 || x >= self.size || y < 0 || y >= self.size {
            println!("  blocked at ({x}, {y})");
            return false;
        }
        (self.x, self.y) = (x, y);
        println!("  bot -> ({x}, {y}) facing {}", self.direction);
        true
    }
}

impl BotCapability for ConsoleBot {
    fn move_forward(&mut self) -> bool {
        let target = self.target();
        self.apply(target)
    }
    fn move_backward(&mut self) -> bool {
        let back = self.direction.turned_left().turned_left();
        let (x, y) = match back {
            Direction::North => (self.x, self.y - 1),
            Direction::East => (self.x + 1, self.y),
            Direction::South => (self.x, self.y + 1),
            Direction::West => (self.x - 1, self.y),
        };
        self.apply((x, y))
    }
    fn turn_left(&mut self) -> bool {
        self.direction = self.direction.turned_left();
        println!("  bot turns left, facing {}", self.direction);
        true
    }
    fn turn_right(&mut self) -> bool {
        self.direction = self.direction.turned_right();
        println!("  bot turns right, facing {}", self.direction);
        true
    }
    fn can_move(&self) -> bool {
        let (x, y) = self.target();
        x >= 0 && x < self.size && y >= 0 && y < self.size
    }
    fn x(&self) -> i64 {
        self.x
    }
    fn y(&self) -> i64 {
        self.y
    }
    fn direction(&self) -> Direction {
        self.direction
    }
    fn keys(&self) -> i64 {
        0
    }
}

const SCRIPT: &str = "\
# zig-zag to the far corner
for leg in range(3):
    while bot.can_move():
        bot.move_forward()
    bot.turn_right()
";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut bot = ConsoleBot {
        x: 0,
        y: 4,
        direction: Direction::North,
        size: 5,
    };
    let mut pacer = BlockingPacer;

    println!("running script:\n{SCRIPT}");
    match ScriptEngine::new().run(SCRIPT, &mut bot, &mut pacer) {
        Ok(summary) => println!(
            "done: {} statements, {} bot operations",
            summary.statements, summary.operations
        ),
        Err(err) => println!("failed: {err}"),
    }
}
