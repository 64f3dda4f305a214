//! Thin CLI driver: load an iNES ROM, reset the CPU, run it for a fixed
//! number of frames, and report final register/cycle state. Owns no CPU
//! semantics of its own — see `nescore::cpu` for the interpreter.

use clap::Parser;
use log::{error, info};
use nescore::{Bus, Cartridge, Cpu};

/// NTSC CPU cycles per frame (29780.5, rounded up as the teacher's loop did).
const CYCLES_PER_FRAME: u64 = 29_781;

#[derive(Parser, Debug)]
#[command(name = "nescore-run", about = "Drive the NES CPU core against an iNES ROM")]
struct Args {
    /// Path to a .nes (iNES v1) ROM file.
    rom: String,

    /// Number of frames to run before reporting final state.
    #[arg(short, long, default_value_t = 1)]
    frames: u32,
}

fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let cartridge = match Cartridge::from_ines_file(&args.rom) {
        Ok(c) => c,
        Err(e) => {
            error!("failed to load {}: {e}", args.rom);
            std::process::exit(1);
        }
    };
    info!(
        "loaded {}: mapper {}, prg {} KiB, chr {} KiB",
        args.rom,
        cartridge.mapper_id(),
        cartridge.prg_rom_len() / 1024,
        cartridge.chr_len() / 1024,
    );

    let mut bus = Bus::new(cartridge);
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    info!("reset complete, pc={:#06x}", cpu.pc());

    for frame in 1..=args.frames {
        match cpu.run(&mut bus, CYCLES_PER_FRAME) {
            Ok(ran) => info!("frame {frame}: ran {ran} cycles"),
            Err(e) => {
                error!("frame {frame}: interpreter halted: {e}");
                break;
            }
        }
        if cpu.halted() {
            break;
        }
    }

    let flags = cpu.flags();
    println!(
        "pc={:#06x} a={:#04x} x={:#04x} y={:#04x} sp={:#04x} cycles={} halted={}",
        cpu.pc(),
        cpu.a(),
        cpu.x(),
        cpu.y(),
        cpu.sp(),
        cpu.cycles(),
        cpu.halted(),
    );
    println!(
        "flags: c={} z={} i={} d={} v={} n={}",
        flags.c as u8, flags.z as u8, flags.i as u8, flags.d as u8, flags.v as u8, flags.n as u8
    );
}
