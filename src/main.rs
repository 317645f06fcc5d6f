use ebt_reader::{
    reconstruct, DirectorySource, DocumentConfig, PageOutcome, SegmentPair, Session, SessionOptions,
};
use std::env;
use std::fs;

fn usage(program: &str) -> ! {
    eprintln!("Usage:");
    eprintln!("  {} config <page.html>", program);
    eprintln!("  {} urls <page.html> [--page N]", program);
    eprintln!("  {} assemble <primary.ebt> <secondary.ebt> <out.swf>", program);
    eprintln!("  {} extract <page.html> <mirror-dir> <out-dir> [--page N] [--no-raw]", program);
    std::process::exit(1);
}

fn fail(context: &str, e: impl std::fmt::Display) -> ! {
    eprintln!("\nERROR: {}", context);
    eprintln!("  {}", e);
    std::process::exit(1);
}

fn load_config(path: &str) -> DocumentConfig {
    let html = fs::read_to_string(path).unwrap_or_else(|e| fail(&format!("Failed to read {}", path), e));
    DocumentConfig::from_html(&html).unwrap_or_else(|e| fail("Failed to decode document configuration", e))
}

/// Parses `--page N` if present.
fn page_arg(args: &[String]) -> Option<u32> {
    let idx = args.iter().position(|arg| arg == "--page")?;
    match args.get(idx + 1).map(|s| s.parse::<u32>()) {
        Some(Ok(page)) if page > 0 => Some(page),
        _ => {
            eprintln!("ERROR: --page flag requires a page number (1-based).");
            std::process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        usage(&args[0]);
    }

    match args[1].as_str() {
        "config" => {
            let config = load_config(&args[2]);
            println!("Document Configuration:");
            println!("  Pages: {}", config.page_count);
            println!("  Host: {}", config.ebt_host);
            println!("  p_code: {}", config.p_code);
            println!("  p_swf: {}", config.p_swf);
            if let Some(preview) = config.preview_pages {
                println!("  Preview pages: {}", preview);
            }
            println!("\nPage entries (first 10):");
            for (i, entry) in config.page_info.iter().take(10).enumerate() {
                let size = config.page_sizes.get(&i).copied().unwrap_or_default();
                println!("  {}. {} (size {})", i + 1, entry, size);
            }
            if config.page_info.len() > 10 {
                println!("  ... and {} more", config.page_info.len() - 10);
            }
        }
        "urls" => {
            let config = load_config(&args[2]);
            let pages = match page_arg(&args) {
                Some(page) => page..=page,
                None => 1..=config.page_count,
            };
            for page in pages {
                match config.page_request(page) {
                    Ok(request) => {
                        println!("{}\t{}", page, request.primary_url);
                        println!("{}\t{}", page, request.secondary_url);
                    }
                    Err(e) => eprintln!("{}\tERROR: {}", page, e),
                }
            }
        }
        "assemble" => {
            if args.len() < 5 {
                usage(&args[0]);
            }
            let read = |path: &str| fs::read(path).unwrap_or_else(|e| fail(&format!("Failed to read {}", path), e));
            let segments = SegmentPair {
                primary: read(&args[2]),
                secondary: read(&args[3]),
            };
            let container = reconstruct(&segments).unwrap_or_else(|e| fail("Failed to reassemble container", e));
            fs::write(&args[4], container.as_bytes())
                .unwrap_or_else(|e| fail(&format!("Failed to write {}", args[4]), e));
            println!("Wrote {} ({} bytes)", args[4], container.len());
        }
        "extract" => {
            if args.len() < 5 {
                usage(&args[0]);
            }
            let mut options = SessionOptions::new(&args[4]);
            if let Some(page) = page_arg(&args) {
                options = options.only_page(page);
            }
            options.keep_raw_on_failure = !args.iter().any(|arg| arg == "--no-raw");

            let session = Session::new(load_config(&args[2]), options);
            let source = DirectorySource::new(&args[3]);

            println!("Extracting pages {:?} from {}", session.page_range(), args[3]);
            println!("{}", "=".repeat(60));

            let mut written = 0usize;
            let mut failed = 0usize;
            for (page, outcome) in session.process_all(&source) {
                match outcome {
                    Ok(PageOutcome::Container { path, size }) => {
                        written += 1;
                        println!("  {}: {} ({} bytes)", page, path.display(), size);
                    }
                    Ok(PageOutcome::RawSegments { primary, secondary, reason }) => {
                        failed += 1;
                        println!(
                            "  {}: kept {} and {} ({})",
                            page,
                            primary.display(),
                            secondary.display(),
                            reason
                        );
                    }
                    Ok(PageOutcome::Skipped { reason }) => {
                        failed += 1;
                        println!("  {}: skipped ({})", page, reason);
                    }
                    Err(e) => {
                        failed += 1;
                        println!("  {}: ERROR {}", page, e);
                    }
                }
            }

            println!("{}", "=".repeat(60));
            println!("Done: {} containers written, {} pages failed.", written, failed);
            if failed > 0 {
                std::process::exit(1);
            }
        }
        _ => usage(&args[0]),
    }
}
