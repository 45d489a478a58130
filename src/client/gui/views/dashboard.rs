use crate::client::gui::theme::{Palette, ThemeContext, ThemeMode};
use crate::client::gui::widgets::{alert, status_badge};
use crate::client::models::app_state::UploadState;
use crate::client::models::messages::Message;
use crate::client::services::response_parser::pretty_json;
use iced::widget::{Button, Column, Container, Image, Row, Scrollable, Space, Text};
use iced::{Alignment, Color, Element, Font, Length};

const EMOJI_FONT: Font = Font::with_name("Segoe UI Emoji");
const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

fn block_style(bg: Color, border: Color, radius: f32) -> iced::theme::Container {
    iced::theme::Container::Custom(Box::new(move |_: &iced::Theme| {
        iced::widget::container::Appearance {
            background: Some(iced::Background::Color(bg)),
            text_color: None,
            border: iced::Border {
                width: 1.0,
                color: border,
                radius: radius.into(),
            },
            shadow: iced::Shadow {
                offset: iced::Vector::new(0.0, 4.0),
                blur_radius: 12.0,
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.15),
            },
        }
    }))
}

pub fn view<'a>(state: &'a UploadState, theme: &ThemeContext) -> Element<'a, Message> {
    let palette = theme.palette();

    let toggle_label = match theme.mode() {
        ThemeMode::Light => "🌙",
        ThemeMode::Dark => "☀️",
    };
    let header = Row::new()
        .align_items(Alignment::Center)
        .push(
            Text::new("Face Verification")
                .size(34)
                .font(BOLD_FONT)
                .style(palette.text),
        )
        .push(Space::new(Length::Fill, Length::Shrink))
        .push(
            Button::new(Text::new(toggle_label).font(EMOJI_FONT).size(18))
                .on_press(Message::ToggleTheme)
                .style(iced::theme::Button::Text)
                .padding([6, 10]),
        );

    let body = Row::new()
        .spacing(24)
        .push(
            Container::new(upload_card(state, palette))
                .width(Length::FillPortion(1)),
        )
        .push(
            Container::new(results_card(state, palette))
                .width(Length::FillPortion(2)),
        );

    Container::new(
        Column::new()
            .spacing(28)
            .padding(32)
            .push(header)
            .push(body),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(block_style(palette.background, palette.background, 0.0))
    .into()
}

fn upload_card<'a>(state: &'a UploadState, palette: &Palette) -> Element<'a, Message> {
    let selected = match &state.selected_file {
        Some(file) => format!("{} ({} KB)", file.file_name, file.size().div_ceil(1024)),
        None => "Click to select image".to_string(),
    };

    let picker = Button::new(
        Container::new(
            Column::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .push(Text::new("📤").font(EMOJI_FONT).size(28))
                .push(Text::new(selected).size(14).style(palette.text_muted)),
        )
        .width(Length::Fill)
        .padding(24)
        .center_x(),
    )
    .on_press(Message::PickFile)
    .style(iced::theme::Button::Secondary)
    .width(Length::Fill);

    let analyze_label = if state.is_loading { "Analyzing..." } else { "Analyze Image" };
    let mut analyze = Button::new(
        Container::new(Text::new(analyze_label).font(BOLD_FONT).size(16))
            .width(Length::Fill)
            .center_x(),
    )
    .style(iced::theme::Button::Primary)
    .width(Length::Fill)
    .padding(12);
    if state.can_submit() {
        analyze = analyze.on_press(Message::Submit);
    }

    Container::new(
        Column::new()
            .spacing(20)
            .push(
                Row::new()
                    .spacing(8)
                    .align_items(Alignment::Center)
                    .push(Text::new("📷").font(EMOJI_FONT).size(20))
                    .push(Text::new("Upload Image").size(20).font(BOLD_FONT).style(palette.text)),
            )
            .push(picker)
            .push(analyze),
    )
    .padding(24)
    .style(block_style(palette.card, palette.card_border, 12.0))
    .into()
}

fn results_card<'a>(state: &'a UploadState, palette: &Palette) -> Element<'a, Message> {
    let mut content = Column::new()
        .spacing(20)
        .push(Text::new("Analysis Results").size(20).font(BOLD_FONT).style(palette.text));

    if let Some(preview) = &state.preview {
        content = content.push(
            Container::new(
                Column::new()
                    .spacing(8)
                    .push(Text::new("Preview Image").size(16).style(palette.text))
                    .push(
                        Image::new(preview.handle())
                            .width(Length::Fill)
                            .height(Length::Fixed(320.0))
                            .content_fit(iced::ContentFit::Contain),
                    ),
            )
            .padding(8)
            .style(block_style(palette.neutral_bg, palette.neutral_border, 8.0)),
        );
    }

    if let Some(error) = &state.error_message {
        content = content.push(alert::error_banner(error, state.error_body.as_ref(), palette));
    }

    if state.is_loading && state.error_message.is_none() && state.last_result.is_none() {
        content = content.push(alert::loading_banner(palette));
    }

    if let Some(result) = &state.last_result {
        content = content.push(result_block(state, result, palette));
    }

    Container::new(Scrollable::new(content).height(Length::Fill))
        .padding(24)
        .height(Length::Fill)
        .style(block_style(palette.card, palette.card_border, 12.0))
        .into()
}

fn result_block<'a>(state: &'a UploadState, result: &serde_json::Value, palette: &Palette) -> Element<'a, Message> {
    let classification = state.classification();
    let (bg, border, _) = palette.tone(classification.tone());

    let mut block = Column::new().spacing(8).push(
        Row::new()
            .spacing(8)
            .align_items(Alignment::Center)
            .push(Text::new("API Response").size(17).style(palette.text))
            .push(status_badge::view(classification, palette)),
    );

    if let Some(parsed) = state.parsed_result() {
        if let Some(detail) = parsed.detail() {
            block = block.push(Text::new(detail.to_string()).size(14).style(palette.text));
        }
        for line in parsed.stage_lines() {
            block = block.push(Text::new(line).size(13).style(palette.text_muted));
        }
    }

    if let Some(at) = state.settled_at {
        block = block.push(
            Text::new(format!("Analyzed at {}", at.format("%H:%M:%S")))
                .size(12)
                .style(palette.text_muted),
        );
    }

    block = block.push(Text::new(pretty_json(result)).font(Font::MONOSPACE).size(12).style(palette.text));

    Container::new(block)
        .padding(16)
        .width(Length::Fill)
        .style(block_style(bg, border, 8.0))
        .into()
}
