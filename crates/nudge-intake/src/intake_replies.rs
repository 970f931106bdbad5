//! Reply text rendering for the intake dialogue.
//!
//! All user-facing wording lives here so the runtime's transition logic
//! stays free of string literals.

use crate::intake_ports::ReminderRow;

/// Keywords that show the usage text from the idle state.
pub const HELP_KEYWORDS: [&str; 2] = ["幫助", "help"];

/// Keywords that abandon a pending event while awaiting its frequency.
pub const CANCEL_KEYWORDS: [&str; 3] = ["退出", "離開", "退"];

pub fn help_text() -> &'static str {
    "輸入「事件 日期時間」建立提醒，例如：打掃 20250901 13:30。\
     日期可寫 2025/09/01 或 20250901，時間可寫 13:30 或 1330；\
     只寫時間會以今天為日期。"
}

pub fn format_error_reply() -> &'static str {
    "格式錯誤，請輸入「事件 日期時間」，例如:打掃 20250901 13:30"
}

pub fn frequency_prompt(event_name: &str, trigger_at: &str) -> String {
    format!(
        "已記下「{event_name}」({trigger_at})。\
         請輸入提醒頻率，例如:3天、2個小時;不需要重複提醒可輸入其他文字,\
         或輸入「退出」取消。"
    )
}

pub fn invalid_magnitude_reply() -> &'static str {
    "頻率前面不是有效的數字，請重新輸入，例如:3天"
}

pub fn cancel_reply() -> &'static str {
    "已取消這次的提醒設定。"
}

pub fn confirmation_reply(event_name: &str, trigger_at: &str, frequency_text: &str) -> String {
    format!("已建立提醒:{event_name} {trigger_at}(頻率:{frequency_text})")
}

pub fn store_failure_reply() -> &'static str {
    "系統暫時無法處理，請稍後再試。"
}

pub fn setup_created_reply() -> &'static str {
    "已建立你的提醒表。"
}

pub fn setup_exists_reply() -> &'static str {
    "提醒表已存在。"
}

pub fn empty_list_reply() -> &'static str {
    "目前沒有任何提醒。"
}

/// Renders stored rows: each entry is the event name and trigger timestamp
/// on their own lines, entries separated by a blank line, no trailing
/// separator after the last.
pub fn render_reminder_list(rows: &[ReminderRow]) -> String {
    rows.iter()
        .map(|row| format!("{}\n{}", row.event_name, row.trigger_at))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::render_reminder_list;
    use crate::intake_ports::ReminderRow;

    fn row(event_name: &str, trigger_at: &str) -> ReminderRow {
        ReminderRow {
            event_name: event_name.to_string(),
            trigger_at: trigger_at.to_string(),
        }
    }

    #[test]
    fn unit_list_rendering_uses_blank_separator_without_trailer() {
        let rows = [
            row("打掃", "2025/09/01 13:30:00"),
            row("繳費", "2025/10/01 09:00:00"),
        ];
        assert_eq!(
            render_reminder_list(&rows),
            "打掃\n2025/09/01 13:30:00\n\n繳費\n2025/10/01 09:00:00"
        );
    }

    #[test]
    fn unit_single_row_has_no_separator() {
        let rows = [row("打掃", "2025/09/01 13:30:00")];
        assert_eq!(render_reminder_list(&rows), "打掃\n2025/09/01 13:30:00");
    }
}
