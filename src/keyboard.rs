use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::render::{Button, ButtonTarget, Render};

fn inline_button(button: &Button) -> InlineKeyboardButton {
    match &button.target {
        ButtonTarget::Action(action) => {
            InlineKeyboardButton::callback(button.label.clone(), action.to_string())
        }
        ButtonTarget::Link(url) => InlineKeyboardButton::url(button.label.clone(), url.clone()),
    }
}

/// One button per row, in render order.
pub(crate) fn render_keyboard(render: &Render) -> InlineKeyboardMarkup {
    let keyboard: Vec<Vec<InlineKeyboardButton>> = render
        .buttons
        .iter()
        .map(|button| vec![inline_button(button)])
        .collect();

    InlineKeyboardMarkup::new(keyboard)
}

#[cfg(test)]
mod tests {
    use teloxide::types::InlineKeyboardButtonKind;

    use super::*;
    use crate::{
        action::Action,
        content::Animal,
        render::{self, Links},
    };

    #[test]
    fn actions_become_callback_buttons() {
        let markup = render_keyboard(&render::welcome("Ann"));

        let data: Vec<_> = markup
            .inline_keyboard
            .iter()
            .map(|row| match &row[0].kind {
                InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
                other => panic!("unexpected button {other:?}"),
            })
            .collect();

        assert_eq!(data, ["start_quiz", "about_program", "contact"]);
    }

    #[test]
    fn links_become_url_buttons() {
        let links = Links::from_site("https://moscowzoo.ru").unwrap();
        let animal = Animal::new("Tiger", "Big", "", vec![], "");

        let markup = render_keyboard(&render::share(&animal, &links));

        assert!(matches!(
            markup.inline_keyboard[0][0].kind,
            InlineKeyboardButtonKind::Url(_)
        ));
        assert_eq!(
            markup.inline_keyboard[1][0].kind,
            InlineKeyboardButtonKind::CallbackData(Action::BackToResult.to_string())
        );
    }
}
