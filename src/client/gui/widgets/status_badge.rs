use crate::client::gui::theme::Palette;
use crate::client::models::messages::Message;
use crate::client::services::response_parser::Classification;
use iced::widget::{Container, Space, Text};
use iced::{Element, Font, Length};

const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

/// "Success"/"Failed" pill. Renders nothing for unrecognized responses.
pub fn view<'a>(classification: Classification, palette: &Palette) -> Element<'a, Message> {
    let Some(label) = classification.label else {
        return Space::new(Length::Shrink, Length::Shrink).into();
    };
    let (_, border, text) = palette.tone(classification.tone());

    Container::new(Text::new(label).font(BOLD_FONT).size(12).style(text))
        .padding([2, 8])
        .style(iced::theme::Container::Custom(Box::new(move |_: &iced::Theme| {
            iced::widget::container::Appearance {
                background: Some(iced::Background::Color(iced::Color::from_rgba(1.0, 1.0, 1.0, 0.6))),
                text_color: Some(text),
                border: iced::Border {
                    width: 1.0,
                    color: border,
                    radius: 4.0.into(),
                },
                shadow: iced::Shadow::default(),
            }
        })))
        .into()
}
