use clap::Parser;
use face_verify::client::services::api_service::ApiService;
use face_verify::client::services::response_parser::{pretty_json, VerificationResponse};
use face_verify::client::utils::file_picker::load_image;
use face_verify::common::config::ClientConfig;
use face_verify::common::errors::UploadError;
use std::path::PathBuf;

/// Upload one image to the face verification API and print the verdict.
#[derive(Parser, Debug)]
#[command(name = "face-verify-cli", version)]
struct Args {
    /// Image to verify (png, jpg, jpeg, bmp, gif, webp)
    image: PathBuf,
    /// Override API_BASE_URL
    #[arg(long)]
    base_url: Option<String>,
    /// Print only the status line, not the JSON body
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let mut config = ClientConfig::from_env();
    if let Some(url) = args.base_url {
        config.api_base_url = url;
    }

    let file = load_image(&args.image, config.max_upload_bytes).await?;
    let api = ApiService::from_config(&config);
    println!("[CLIENT] {} -> {}", file.file_name, api.verification_url());

    match api.upload(&file).await {
        Ok(body) => {
            let parsed = VerificationResponse::decode(&body);
            let classification = parsed.classification();
            match (classification.label, parsed.version()) {
                (Some(label), Some(version)) => println!("Status: {} ({})", label, version),
                _ => println!("Status: (no status)"),
            }
            if let Some(detail) = parsed.detail() {
                println!("Detail: {}", detail);
            }
            for line in parsed.stage_lines() {
                println!("  {}", line);
            }
            if !args.quiet {
                println!("{}", pretty_json(&body));
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("[CLIENT] {}", err);
            if let UploadError::HttpStatus { body: Some(body), .. } = &err {
                eprintln!("{}", pretty_json(body));
            }
            Err(err.into())
        }
    }
}
