use face_verify::client::gui::app::FaceVerifyApp;
use face_verify::common::config::ClientConfig;
use iced::Application;

fn main() -> iced::Result {
    // load environment from .env (optional)
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ClientConfig::from_env();
    FaceVerifyApp::run(iced::Settings::with_flags(config))
}
