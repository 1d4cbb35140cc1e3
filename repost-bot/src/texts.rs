//! User-visible texts.

use std::fmt::Display;

pub const CHOOSE_STYLE: &str = "Выбери стиль оформления текста:";
pub const CHOOSE_LENGTH: &str = "Теперь выбери длину текста:";
pub const SEND_LINK: &str = "Отправьте ссылку, начиная с http.";
pub const SEQUENCE_ERROR: &str =
    "Произошла ошибка: не удалось найти данные для обработки. Пожалуйста, начните заново, отправив URL.";
pub const WORKING: &str = "Готовлю текст, подожди немного…";
pub const UNKNOWN_STYLE: &str = "Неизвестный стиль. Выбери один из предложенных.";
pub const UNKNOWN_CHOICE: &str = "Неизвестная команда.";

pub fn processing_failed(cause: impl Display) -> String {
    format!("Произошла ошибка при обработке статьи: {}", cause)
}
