use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use formfill::logging::init_logging;
use formfill::platforms::{MemoryClipboard, MemoryElement};
use formfill::{
    CheckElement, ComboElement, ComboStrategy, EditElement, Form, PasswordElement, SendMethod,
};

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let clipboard = MemoryClipboard::new();
    let user = MemoryElement::edit("guest");
    let password = MemoryElement::edit("").with_clipboard(clipboard.clone());
    // masked date input, the way legacy desktop apps render them
    let date = MemoryElement::edit("  .  .    ").with_normalizer(|typed| {
        let digits: String = typed.chars().filter(char::is_ascii_digit).collect();
        match digits.len() {
            8 => format!("{}.{}.{}", &digits[..2], &digits[2..4], &digits[4..]),
            _ => typed.trim().to_string(),
        }
    });
    let remember = MemoryElement::check_box(false);
    let day = MemoryElement::combo_box(&["Monday", "Tuesday", "Wednesday", "Thursday"], Some(0));

    let mut form = Form::new("login").with_delay(Duration::from_millis(50));
    form.add((EditElement::new(user.clone()), "John Doe"))
        .add((
            PasswordElement::builder(password.clone())
                .send_method(SendMethod::Pasting)
                .clipboard(Arc::new(clipboard.clone()))
                .build()?,
            "1234",
        ))
        .add((
            EditElement::builder(date.clone())
                .default_value("  .  .    ")
                .build()?,
            "01012024",
            "01.01.2024",
        ))
        .add((CheckElement::new(remember.clone()), true))
        .add((
            ComboElement::builder(day.clone())
                .strategy(ComboStrategy::Walk)
                .build(),
            "Wednesday",
        ));

    form.complete()
        .with_context(|| format!("could not fill {form}"))?;

    println!("user:     {}", user.content());
    println!("date:     {}", date.content());
    println!("remember: {}", remember.toggled());
    println!("day:      {}", day.content());
    println!("clipboard left empty: {}", clipboard.text().is_empty());
    Ok(())
}
