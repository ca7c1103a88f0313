use clap::{Args, Parser, Subcommand};
use dockfx::layout::{CONTAINER_RATIO, DEFAULT_ICON_COUNT, DEFAULT_PADDING};
use dockfx::{Dock, DockSettings, Effect, Layout, LayoutSpec, Phase, PointerEvent};
use std::iter;

const FRAME: f64 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "dockfx", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Copy)]
struct LayoutArgs {
    /// Screen width in pixels
    #[arg(short, long)]
    width: f64,

    /// Number of icons in the row
    #[arg(short = 'n', long, default_value_t = DEFAULT_ICON_COUNT)]
    icons: usize,

    /// Container padding in pixels
    #[arg(short, long, default_value_t = DEFAULT_PADDING)]
    padding: f64,

    /// Clamp resolved indices into the icon range
    #[arg(long)]
    clamp: bool,
}

impl LayoutArgs {
    fn spec(&self) -> LayoutSpec {
        LayoutSpec {
            screen_width: self.width,
            icon_count: self.icons,
            padding: self.padding,
            container_ratio: CONTAINER_RATIO,
            clamp_index: self.clamp,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the layout constants derived from a screen width
    Layout(LayoutArgs),
    /// Replay a drag through the dock and print every box's effect
    Trace {
        #[command(flatten)]
        layout: LayoutArgs,

        /// Pointer x positions relative to the container; the first starts the drag
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        x: Vec<f64>,

        /// Spring frames (60 fps) to run after each sample; 0 prints the targets
        #[arg(short, long, default_value_t = 0)]
        frames: u32,

        /// End the drag after the last sample
        #[arg(long)]
        release: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Layout(args) => {
            print_layout(&Layout::compute(&args.spec())?);
            Ok(())
        }
        Commands::Trace {
            layout,
            x,
            frames,
            release,
        } => trace(
            &DockSettings {
                layout: layout.spec(),
                ..DockSettings::default()
            },
            &x,
            frames,
            release,
        ),
    }
}

fn print_layout(layout: &Layout) {
    println!("container_width {:.3}", layout.container_width());
    println!("container_height {:.3}", layout.container_height());
    println!("icon_size {:.3}", layout.icon_size());
    println!("padding {:.3}", layout.padding());
    println!("icon_count {}", layout.icon_count());
}

fn trace(settings: &DockSettings, xs: &[f64], frames: u32, release: bool) -> anyhow::Result<()> {
    let mut dock = Dock::new(settings)?;
    let phases = iter::once(Phase::Start).chain(iter::repeat(Phase::Move));

    for (phase, &x) in phases.zip(xs) {
        dock.handle(PointerEvent::new(phase, x));
        print_step(&mut dock, &format!("{} x={:.2}", phase, x), frames);
    }

    if release {
        let x = xs.last().copied().unwrap_or_default();
        dock.handle(PointerEvent::new(Phase::End, x));
        print_step(&mut dock, "end", frames);
    }
    Ok(())
}

fn print_step(dock: &mut Dock, label: &str, frames: u32) {
    let effects: Vec<Effect> = if frames == 0 {
        dock.targets()
    } else {
        for _ in 0..frames {
            dock.tick(FRAME);
        }
        dock.effects()
    };

    println!("{} -> {}", label, dock.position());
    println!(
        "{:>4} {:>8} {:>8} {:>6} {:>8} {:>9}",
        "box", "scale", "lift", "z", "margin", "elevation"
    );
    for (i, e) in effects.iter().enumerate() {
        println!(
            "{:>4} {:>8.3} {:>8.3} {:>6.2} {:>8.3} {:>9.3}",
            i, e.scale, e.translate_y, e.z_index, e.margin, e.elevation
        );
    }
}
