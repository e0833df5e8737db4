//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable [`Frame`]. No game
//! logic is performed; this module only translates the snapshot into terminal
//! commands. One level cell (64 px) is drawn as a 4 × 2 block of characters.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use bunny_run::entities::{EnemyKind, Facing, PickupKind, PlayerFrame, Rect, Stage};
use bunny_run::snapshot::Frame;

/// Level pixels per terminal column.
const PX_PER_COL: i32 = 16;
/// Level pixels per terminal row.
const PX_PER_ROW: i32 = 32;
/// First row of the play area; row 0 is the HUD.
const PLAY_TOP: i32 = 1;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::White;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEARTS: Color = Color::Red;
const C_HUD_TIME_LOW: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_COIN: Color = Color::Yellow;
const C_GOAL: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;
const C_OVERLAY: Color = Color::Magenta;

/// Width in level pixels of what a terminal `cols` wide can show.
pub fn viewport_width(cols: u16) -> i32 {
    cols as i32 * PX_PER_COL
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &Frame, cols: u16, rows: u16) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let screen = Screen { cols, rows, camera_x: frame.camera_x };

    for block in &frame.blocks {
        let color = material_color(&block.material);
        screen.sprite(out, &block.rect, ["████", "▓▓▓▓"], color)?;
    }
    for goal in &frame.goals {
        screen.sprite(out, goal, ["╔══╗", "║@@║"], C_GOAL)?;
    }
    for coin in &frame.coins {
        screen.sprite(out, coin, [" () ", "    "], C_COIN)?;
    }
    for item in &frame.pickups {
        let (art, color) = pickup_art(item.kind);
        screen.sprite(out, &item.rect, art, color)?;
    }
    for enemy in &frame.enemies {
        let (art, color) = enemy_art(enemy.kind, enemy.frame, enemy.facing);
        screen.sprite(out, &enemy.rect, art, color)?;
    }
    if frame.player.visible {
        screen.sprite(out, &frame.player.rect, player_art(frame.player.frame), C_PLAYER)?;
    }

    draw_hud(out, frame, cols)?;
    draw_controls_hint(out, rows)?;
    draw_overlay(out, frame, cols, rows)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Projection ────────────────────────────────────────────────────────────────

struct Screen {
    cols: u16,
    rows: u16,
    camera_x: i32,
}

impl Screen {
    /// Draw a two-row sprite at `rect`, clipping whatever falls off screen.
    fn sprite<W: Write>(
        &self,
        out: &mut W,
        rect: &Rect,
        art: [&str; 2],
        color: Color,
    ) -> std::io::Result<()> {
        let col = (rect.x - self.camera_x).div_euclid(PX_PER_COL);
        let row = rect.y.div_euclid(PX_PER_ROW) + PLAY_TOP;
        out.queue(style::SetForegroundColor(color))?;
        for (dy, line) in art.iter().enumerate() {
            self.text(out, col, row + dy as i32, line)?;
        }
        Ok(())
    }

    fn text<W: Write>(&self, out: &mut W, col: i32, row: i32, line: &str) -> std::io::Result<()> {
        // Keep the bottom row free for the controls hint.
        if row < PLAY_TOP || row >= self.rows as i32 - 1 {
            return Ok(());
        }
        for (dx, ch) in line.chars().enumerate() {
            let c = col + dx as i32;
            if ch == ' ' || c < 0 || c >= self.cols as i32 {
                continue;
            }
            out.queue(cursor::MoveTo(c as u16, row as u16))?;
            out.queue(Print(ch))?;
        }
        Ok(())
    }
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn material_color(material: &str) -> Color {
    // Longest prefixes first: "SN" and "ST" must not fall through to "S".
    if material.starts_with("SN") {
        Color::White
    } else if material.starts_with("ST") {
        Color::Grey
    } else if material.starts_with('S') {
        Color::DarkYellow
    } else if material.starts_with('C') {
        Color::Magenta
    } else if material.starts_with('W') {
        Color::DarkRed
    } else {
        Color::Green
    }
}

fn player_art(frame: PlayerFrame) -> [&'static str; 2] {
    match frame {
        PlayerFrame::Idle => ["(\\/)", "(oo)"],
        PlayerFrame::Run { index: 0, facing: Facing::Right } => ["(\\/)", "(oo>"],
        PlayerFrame::Run { facing: Facing::Right, .. } => ["(\\/)", "/oo>"],
        PlayerFrame::Run { index: 0, facing: Facing::Left } => ["(\\/)", "<oo)"],
        PlayerFrame::Run { facing: Facing::Left, .. } => ["(\\/)", "<oo\\"],
        PlayerFrame::Jump(Facing::Right) => ["\\\\//", "(oo>"],
        PlayerFrame::Jump(Facing::Left) => ["\\\\//", "<oo)"],
    }
}

fn enemy_art(kind: EnemyKind, frame: usize, facing: Facing) -> ([&'static str; 2], Color) {
    let art = match (kind, frame % 2, facing) {
        (EnemyKind::Patrol, 0, _) => ["/^^\\", "/  \\"],
        (EnemyKind::Patrol, _, _) => ["/^^\\", " || "],
        (EnemyKind::EdgeAwarePatrol, 0, _) => ["\\**/", "/**\\"],
        (EnemyKind::EdgeAwarePatrol, _, _) => ["-**-", "-**-"],
        (EnemyKind::Flyer, 0, Facing::Left) => ["\\vv/", "<oo "],
        (EnemyKind::Flyer, 0, Facing::Right) => ["\\vv/", " oo>"],
        (EnemyKind::Flyer, _, Facing::Left) => ["/^^\\", "<oo "],
        (EnemyKind::Flyer, _, Facing::Right) => ["/^^\\", " oo>"],
    };
    let color = match kind {
        EnemyKind::Patrol => Color::Red,
        EnemyKind::EdgeAwarePatrol => Color::DarkMagenta,
        EnemyKind::Flyer => Color::Cyan,
    };
    (art, color)
}

fn pickup_art(kind: PickupKind) -> ([&'static str; 2], Color) {
    match kind {
        PickupKind::ExtraLife => ([" \\/ ", " VV "], Color::DarkYellow),
        PickupKind::Heart => (["<3<3", "    "], Color::Red),
        PickupKind::ScoreBonus => ([" \\/ ", " $$ "], Color::Yellow),
        PickupKind::ScorePenalty => (["  / ", " /  "], Color::Blue),
        PickupKind::Jetpack => (["[##]", " ^^ "], Color::Grey),
        PickupKind::Invincibility => (["(  )", "(  )"], Color::Cyan),
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, frame: &Frame, cols: u16) -> std::io::Result<()> {
    let hud = &frame.hud;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEARTS))?;
    out.queue(Print(format!(
        "{}{}",
        "♥".repeat(hud.hearts as usize),
        "♡".repeat(hud.max_hearts.saturating_sub(hud.hearts) as usize)
    )))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "  x{}  Coins:{:>2}  Level {}/{}",
        hud.lives, hud.coins, hud.level, hud.level_count
    )))?;

    let time_color = if hud.remaining_seconds <= 10 {
        C_HUD_TIME_LOW
    } else {
        C_HUD
    };
    out.queue(style::SetForegroundColor(time_color))?;
    out.queue(Print(format!("  Time:{:>3}", hud.remaining_seconds)))?;

    if let Some(secs) = hud.jetpack_seconds {
        out.queue(style::SetForegroundColor(Color::Cyan))?;
        out.queue(Print(format!("  Jetpack:{}", secs)))?;
    }

    let score = format!("Score:{:>7}", hud.score);
    let sx = cols.saturating_sub(score.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(score))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   SPACE : Jump   F : Sprint   P : Pause   M : Sound   Q : Quit",
    ))?;
    Ok(())
}

// ── Stage overlays ────────────────────────────────────────────────────────────

fn draw_overlay<W: Write>(out: &mut W, frame: &Frame, cols: u16, rows: u16) -> std::io::Result<()> {
    let score = format!("Score: {}", frame.hud.score);
    let lines: Vec<String> = match frame.stage {
        Stage::Playing => return Ok(()),
        Stage::Splash => vec![
            "B U N N Y   R U N".into(),
            "Are you up to the challenge?".into(),
            String::new(),
            "PRESS ANY KEY TO START".into(),
        ],
        Stage::Start => vec!["Ready?!!!".into(), "Press any key to start".into()],
        Stage::Paused => vec!["Paused".into(), "Press P to resume".into()],
        Stage::LevelCompleted => vec![
            "Level Complete".into(),
            score,
            "Press any key to continue".into(),
        ],
        Stage::GameOver => vec!["Game Over".into(), score, "Press R to restart".into()],
        Stage::Victory => vec![
            "CONGRATULATIONS!".into(),
            "You are the ultimate bunny runner".into(),
            score,
            "Press R to run again".into(),
        ],
    };

    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
    let mut boxed = vec![format!("╔{}╗", "═".repeat(inner))];
    for line in &lines {
        let len = line.chars().count();
        let left = (inner - len) / 2;
        let right = inner - len - left;
        boxed.push(format!("║{}{}{}║", " ".repeat(left), line, " ".repeat(right)));
    }
    boxed.push(format!("╚{}╝", "═".repeat(inner)));

    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(boxed.len() as u16 / 2);
    out.queue(style::SetForegroundColor(C_OVERLAY))?;
    for (i, line) in boxed.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}
