use std::path::PathBuf;
use std::process::exit;

use gzipd::{compress_file, decompress_file};
use structopt::StructOpt;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(StructOpt)]
#[structopt(name = "gzipd", about = "A from-scratch gzip/DEFLATE encoder and decoder")]
enum Command {
    /// Print this help text
    #[structopt(name = "help", alias = "-h")]
    Help,
    /// Print the version number
    #[structopt(name = "version", alias = "-v")]
    Version,
    /// Compress a file into <file>.gz
    #[structopt(name = "compress", alias = "-c")]
    Compress { file: PathBuf },
    /// Decompress a .gz file
    #[structopt(name = "decompress", alias = "-d")]
    Decompress { file: PathBuf },
}

fn print_banner() {
    println!("gzipd {VERSION}");
    println!("a from-scratch gzip/DEFLATE encoder and decoder");
}

fn print_help() {
    print_banner();
    println!();
    println!("usage:");
    println!("    gzipd help | -h               show this text");
    println!("    gzipd version | -v            show the version number");
    println!("    gzipd compress | -c <file>     compress <file> to <file>.gz");
    println!("    gzipd decompress | -d <file>   decompress <file> in place");
}

fn main() {
    let command = Command::from_args();

    let result = match command {
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            println!("{VERSION}");
            Ok(())
        }
        Command::Compress { file } => {
            let output = file.with_extension(
                file.extension()
                    .map(|ext| format!("{}.gz", ext.to_string_lossy()))
                    .unwrap_or_else(|| "gz".to_string()),
            );
            compress_file(&file, &output).map(|_| {
                println!("{} -> {}", file.display(), output.display());
            })
        }
        Command::Decompress { file } => {
            let output = if file.extension().map(|e| e == "gz").unwrap_or(false) {
                file.with_extension("")
            } else {
                file.with_extension("out")
            };
            decompress_file(&file, &output).map(|_| {
                println!("{} -> {}", file.display(), output.display());
            })
        }
    };

    if let Err(e) = result {
        eprintln!("gzipd: {e}");
        exit(1);
    }
}
