use crate::client::gui::theme::ThemeContext;
use crate::client::gui::views::dashboard;
use crate::client::models::app_state::{SettleOutcome, UploadState};
use crate::client::models::messages::Message;
use crate::client::models::selection::PreviewRegistry;
use crate::client::services::api_service::ApiService;
use crate::client::utils::file_picker;
use crate::client::utils::theme_store::ThemeStore;
use crate::common::config::ClientConfig;
use iced::{Application, Command, Element, Theme};
use log::{error, info};

pub struct FaceVerifyApp {
    pub state: UploadState,
    pub theme: ThemeContext,
    api: ApiService,
    previews: PreviewRegistry,
    max_upload_bytes: u64,
}

impl Application for FaceVerifyApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = ClientConfig;

    fn new(config: ClientConfig) -> (Self, Command<Message>) {
        info!("[APP_START] verification endpoint: {}", config.verification_url());
        let app = FaceVerifyApp {
            state: UploadState::new(),
            theme: ThemeContext::init(ThemeStore::new(&config.theme_store_path)),
            api: ApiService::from_config(&config),
            previews: PreviewRegistry::new(),
            max_upload_bytes: config.max_upload_bytes,
        };
        (app, Command::none())
    }

    fn title(&self) -> String {
        "Face Verification".to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::NoOp => {}
            Message::PickFile => {
                let max_bytes = self.max_upload_bytes;
                return Command::perform(file_picker::pick_image(max_bytes), |picked| match picked {
                    Some(Ok(file)) => Message::FileLoaded(file),
                    Some(Err(e)) => Message::FileRejected(e.to_string()),
                    // dialog chiuso senza selezione
                    None => Message::NoOp,
                });
            }
            Message::FileLoaded(file) => {
                let preview = self.previews.acquire(&file);
                self.state.select_file(file, preview);
            }
            Message::FileRejected(reason) => {
                self.state.reject_selection(reason);
            }
            Message::Submit => {
                let Some(ticket) = self.state.begin_submit() else {
                    return Command::none();
                };
                let api = self.api.clone();
                return Command::perform(
                    async move {
                        let outcome = api.upload(&ticket.file).await;
                        (ticket.generation, outcome)
                    },
                    |(generation, outcome)| Message::UploadFinished { generation, outcome },
                );
            }
            Message::UploadFinished { generation, outcome } => {
                if let Err(e) = &outcome {
                    error!("[APP] upload failed: {}", e);
                }
                if self.state.settle(generation, outcome) == SettleOutcome::Stale {
                    info!("[APP] ignored outcome of superseded request #{}", generation);
                }
            }
            Message::ToggleTheme => {
                let mode = self.theme.toggle();
                info!("[APP] theme switched to {}", mode.as_str());
            }
        }
        Command::none()
    }

    fn view(&self) -> Element<Message> {
        dashboard::view(&self.state, &self.theme)
    }

    fn theme(&self) -> Theme {
        self.theme.iced_theme()
    }
}
