use rand::Rng;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const LOGO: &[&str] = &[
    "╔╦╗╦╔═╗╔═╗╔═╗╔╦╗╔═╗╦ ╦  ╔╦╗╔═╗╔═╗╦╔═",
    " ║║║╚═╗╠═╝╠═╣ ║ ║  ╠═╣   ║║║╣ ╚═╗╠╩╗",
    "═╩╝╩╚═╝╩  ╩ ╩ ╩ ╚═╝╩ ╩  ═╩╝╚═╝╚═╝╩ ╩",
];

/// Ember gradient: deep red -> orange -> amber -> gold -> back to red.
pub const GRADIENT: &[(f64, f64, f64)] = &[
    (214.0, 69.0, 65.0),  // #d64541 signal red
    (235.0, 120.0, 66.0), // #eb7842 orange
    (244.0, 164.0, 96.0), // #f4a460 amber
    (250.0, 208.0, 122.0),// #fad07a gold
    (214.0, 69.0, 65.0),  // wrap back to red
];

pub const MAX_PARTICLES: usize = 16;
pub const PARTICLE_CHARS: &[char] = &['·', '∘', '•'];

/// Milliseconds for the banner/error fade-in.
pub const FADE_IN_MS: f64 = 300.0;

/// Interpolate along the gradient for a position in 0.0..1.0
pub fn gradient_color(t: f64) -> Color {
    let t = t.rem_euclid(1.0);
    let segments = (GRADIENT.len() - 1) as f64;
    let scaled = t * segments;
    let idx = (scaled as usize).min(GRADIENT.len() - 2);
    let frac = scaled - idx as f64;

    let (r1, g1, b1) = GRADIENT[idx];
    let (r2, g2, b2) = GRADIENT[idx + 1];

    let r = (r1 + (r2 - r1) * frac) as u8;
    let g = (g1 + (g2 - g1) * frac) as u8;
    let b = (b1 + (b2 - b1) * frac) as u8;

    Color::Rgb(r, g, b)
}

/// Fade-in progress (0.0..1.0) for an element shown `elapsed_ms` ago.
pub fn fade_in(elapsed_ms: f64) -> f64 {
    (elapsed_ms / FADE_IN_MS).clamp(0.0, 1.0)
}

/// Scale a gradient stop by a brightness factor in 0.0..1.0.
pub fn dimmed(t: f64, brightness: f64) -> Color {
    let brightness = brightness.clamp(0.0, 1.0);
    match gradient_color(t) {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f64 * brightness) as u8,
            (g as f64 * brightness) as u8,
            (b as f64 * brightness) as u8,
        ),
        other => other,
    }
}

/// A status mote drifting down the screen behind the form.
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub drift: f64,
    pub brightness: f64,
    pub char_idx: usize,
    pub color_t: f64,
}

impl Particle {
    /// Spawn above the viewport so it drifts down into view.
    pub fn new(width: u16, _height: u16) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            x: rng.gen_range(0.0..width.max(1) as f64),
            y: -rng.gen_range(0.0..4.0),
            speed: rng.gen_range(0.08..0.3),
            drift: rng.gen_range(-0.06..0.06),
            brightness: 0.0,
            char_idx: rng.gen_range(0..PARTICLE_CHARS.len()),
            color_t: rng.gen_range(0.0..1.0),
        }
    }

    /// Spawn at a random position already within the viewport (pre-seeding).
    pub fn seeded(width: u16, height: u16) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            x: rng.gen_range(0.0..width.max(1) as f64),
            y: rng.gen_range(0.0..height.max(1) as f64),
            speed: rng.gen_range(0.08..0.3),
            drift: rng.gen_range(-0.06..0.06),
            brightness: rng.gen_range(0.2..0.5),
            char_idx: rng.gen_range(0..PARTICLE_CHARS.len()),
            color_t: rng.gen_range(0.0..1.0),
        }
    }

    pub fn tick(&mut self) {
        self.y += self.speed;
        self.x += self.drift;
        if self.y > 0.0 {
            self.brightness = (self.brightness + 0.06).min(0.5);
        }
    }

    pub fn is_dead(&self, height: u16) -> bool {
        self.y > height as f64 + 1.0
    }
}

/// Pre-seed a full set of particles spread across the viewport.
pub fn pre_seed_particles(width: u16, height: u16) -> Vec<Particle> {
    (0..MAX_PARTICLES)
        .map(|_| Particle::seeded(width, height))
        .collect()
}

/// Standard per-tick particle update: advance existing, cull dead, maybe spawn new.
pub fn tick_particles(particles: &mut Vec<Particle>, width: u16, height: u16) {
    for p in particles.iter_mut() {
        p.tick();
    }
    particles.retain(|p| !p.is_dead(height));
    let mut rng = rand::thread_rng();
    if particles.len() < MAX_PARTICLES && rng.gen_range(0..4) == 0 {
        particles.push(Particle::new(width, height));
    }
}

pub fn render_particles(particles: &[Particle], frame: &mut Frame, area: Rect) {
    let buf = frame.buffer_mut();
    for p in particles {
        let x = p.x as i32;
        let y = p.y as i32;
        if x < area.x as i32
            || y < area.y as i32
            || x >= (area.x + area.width) as i32
            || y >= (area.y + area.height) as i32
        {
            continue;
        }
        let cell_x = x as u16;
        let cell_y = y as u16;
        if let Some(cell) = buf.cell_mut((cell_x, cell_y)) {
            // Only draw on empty cells so the form stays readable
            if cell.symbol() == " " {
                cell.set_char(PARTICLE_CHARS[p.char_idx]);
                cell.set_style(Style::default().fg(dimmed(p.color_t, p.brightness)));
            }
        }
    }
}

/// Render the logo with a slow gradient shimmer driven by `phase`.
pub fn render_logo(phase: f64, frame: &mut Frame, area: Rect) {
    let logo_width = LOGO.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let lines: Vec<Line> = LOGO
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .enumerate()
                .map(|(col, ch)| {
                    let t = col as f64 / logo_width.max(1) as f64 + phase * 0.25;
                    Span::styled(ch.to_string(), Style::default().fg(gradient_color(t)))
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_color_at_zero() {
        let color = gradient_color(0.0);
        assert_eq!(color, Color::Rgb(214, 69, 65));
    }

    #[test]
    fn gradient_color_at_one_wraps() {
        let color = gradient_color(1.0);
        assert_eq!(color, Color::Rgb(214, 69, 65));
    }

    #[test]
    fn gradient_color_midpoint_returns_rgb() {
        let color = gradient_color(0.5);
        assert!(matches!(color, Color::Rgb(_, _, _)));
    }

    #[test]
    fn fade_in_ramps_and_clamps() {
        assert_eq!(fade_in(0.0), 0.0);
        assert!(fade_in(150.0) > 0.4 && fade_in(150.0) < 0.6);
        assert_eq!(fade_in(300.0), 1.0);
        assert_eq!(fade_in(10_000.0), 1.0);
    }

    #[test]
    fn dimmed_at_zero_is_black() {
        assert_eq!(dimmed(0.0, 0.0), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn particle_new_starts_above_screen() {
        let p = Particle::new(80, 24);
        assert!(p.y <= 0.0);
        assert_eq!(p.brightness, 0.0);
    }

    #[test]
    fn particle_seeded_within_viewport() {
        let p = Particle::seeded(80, 24);
        assert!(p.x >= 0.0 && p.x < 80.0);
        assert!(p.y >= 0.0 && p.y < 24.0);
        assert!(p.brightness >= 0.2);
    }

    #[test]
    fn particle_tick_moves_down() {
        let mut p = Particle::new(80, 24);
        let y_before = p.y;
        p.tick();
        assert!(p.y > y_before);
    }

    #[test]
    fn particle_dies_below_screen() {
        let mut p = Particle::new(80, 24);
        p.y = 24.5;
        assert!(!p.is_dead(24));
        p.y = 25.5;
        assert!(p.is_dead(24));
    }

    #[test]
    fn pre_seed_creates_max_particles() {
        let particles = pre_seed_particles(80, 24);
        assert_eq!(particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn tick_particles_culls_dead() {
        let mut particles = vec![Particle::new(80, 24)];
        particles[0].y = 30.0; // force dead
        tick_particles(&mut particles, 80, 24);
        assert!(particles.len() <= 1);
        for p in &particles {
            assert!(!p.is_dead(24));
        }
    }

    #[test]
    fn logo_rows_share_width() {
        let widths: Vec<usize> = LOGO.iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }
}
