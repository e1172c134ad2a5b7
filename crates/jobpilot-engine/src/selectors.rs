//! Selectors and page markers for hh.ru.
//!
//! Everything the flows probe for is named here so UI changes on the site are
//! a one-file fix.

use crate::page::Locator;

/// Marker text shown on vacancies the account already applied to.
pub const ALREADY_APPLIED_MARKER: &str = "Вы откликнулись";

/// Link that opens the cover-letter response popup directly.
pub const COVER_LETTER_LINK_CSS: &str = "a";
pub const COVER_LETTER_LINK_TEXT: &str = "Написать сопроводительное";

/// The response popup and its controls.
pub const RESPONSE_POPUP: &str = "[data-qa='vacancy-response-popup']";
pub const POPUP_LETTER_INPUT: &str = "textarea[data-qa='vacancy-response-popup-form-letter-input']";
pub const POPUP_SUBMIT: &str = "button[data-qa='vacancy-response-submit-popup']";

/// Primary apply control. Top and bottom placements are mutually exclusive
/// depending on page layout.
pub const APPLY_LINK_TOP: &str = "[data-qa='vacancy-response-link-top']";
pub const APPLY_LINK_BOTTOM: &str = "[data-qa='vacancy-response-link-bottom']";

/// Split-button arrow adjacent to the apply control.
pub const APPLY_DROPDOWN: &str =
    "[data-qa='vacancy-response-link-top'] + button, [data-qa='vacancy-response-link-bottom'] + button";

/// Dropdown option that opens the cover-letter popup.
pub const WITH_LETTER_OPTION: &str = "С сопроводительным письмом";

/// Post-apply letter screen.
pub const BARE_TEXTAREA: &str = "textarea";
pub const SEND_BUTTON_CSS: &str = "button";
pub const SEND_BUTTON_TEXT: &str = "Отправить";

/// Phrases confirming a submitted application.
pub const CONFIRMATION_PHRASES: [&str; 6] = [
    "Отклик отправлен",
    "Вы откликнулись",
    "Резюме доставлено",
    "Ваш отклик принят",
    "Спасибо за отклик",
    "Отклик успешно отправлен",
];

/// Search result page.
pub const SERP_CARD: &str = "[data-qa='vacancy-serp__vacancy']";
pub const SERP_TITLE: &str = "[data-qa='serp-item__title']";
pub const SERP_EMPLOYER: &str = "[data-qa='vacancy-serp__vacancy-employer']";
pub const VACANCY_DESCRIPTION: &str = "[data-qa='vacancy-description']";

/// Element whose presence indicates a completed login.
pub const LOGIN_RESUME_LINK: &str = "a[href*='/resume']";

pub fn already_applied() -> Locator {
    Locator::text(ALREADY_APPLIED_MARKER)
}

pub fn cover_letter_link() -> Locator {
    Locator::css_with_text(COVER_LETTER_LINK_CSS, COVER_LETTER_LINK_TEXT)
}

pub fn response_popup() -> Locator {
    Locator::css(RESPONSE_POPUP)
}

pub fn popup_letter_input() -> Locator {
    Locator::css(POPUP_LETTER_INPUT)
}

pub fn popup_submit() -> Locator {
    Locator::css(POPUP_SUBMIT)
}

pub fn apply_link_top() -> Locator {
    Locator::css(APPLY_LINK_TOP)
}

pub fn apply_link_bottom() -> Locator {
    Locator::css(APPLY_LINK_BOTTOM)
}

pub fn apply_dropdown() -> Locator {
    Locator::css(APPLY_DROPDOWN)
}

pub fn with_letter_option() -> Locator {
    Locator::text(WITH_LETTER_OPTION)
}

pub fn bare_textarea() -> Locator {
    Locator::css(BARE_TEXTAREA)
}

pub fn send_button() -> Locator {
    Locator::css_with_text(SEND_BUTTON_CSS, SEND_BUTTON_TEXT)
}

pub fn vacancy_description() -> Locator {
    Locator::css(VACANCY_DESCRIPTION)
}

pub fn serp_card() -> Locator {
    Locator::css(SERP_CARD)
}

pub fn login_resume_link() -> Locator {
    Locator::css(LOGIN_RESUME_LINK)
}
