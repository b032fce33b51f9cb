use std::sync::Arc;

use crate::fields::{
    CheckElement, ClearStrategy, ComboElement, ComboStrategy, EditElement, FieldElement,
    PasswordElement, RadioElement, ValueSource,
};
use crate::platforms::{MemoryAction, MemoryClipboard, MemoryElement};
use crate::types::{FieldValue, FocusMode, SendMethod, TextAction};
use crate::{AutomationError, FormError};

fn key(k: &str) -> MemoryAction {
    MemoryAction::SendKey(k.to_string())
}

fn text(t: &str) -> MemoryAction {
    MemoryAction::SendText(t.to_string())
}

const FOCUS: MemoryAction = MemoryAction::Focus(FocusMode::Default);

#[test]
fn test_edit_setter_is_noop_when_value_matches() -> Result<(), FormError> {
    let widget = MemoryElement::edit("John Doe");
    let edit = EditElement::new(widget.clone());

    edit.set_value(&"John Doe".into())?;

    assert_eq!(widget.action_count(), 0, "no UI action for an equal value");
    Ok(())
}

#[test]
fn test_edit_clears_then_types() -> Result<(), FormError> {
    super::init_tracing();
    let widget = MemoryElement::edit("Jane Roe");
    let edit = EditElement::new(widget.clone());

    edit.set_value(&"John Doe".into())?;

    assert_eq!(
        widget.actions(),
        vec![FOCUS, key("CTRL+A"), key("DEL"), text("John Doe")]
    );
    assert_eq!(edit.value()?, FieldValue::from("John Doe"));
    Ok(())
}

#[test]
fn test_edit_skips_clearing_default_value() -> Result<(), FormError> {
    let widget = MemoryElement::edit("  .  .    ");
    let edit = EditElement::builder(widget.clone())
        .default_value("  .  .    ")
        .build()?;

    edit.set_value(&"01.01.2024".into())?;

    assert_eq!(widget.actions(), vec![FOCUS, text("01.01.2024")]);
    Ok(())
}

#[test]
fn test_edit_empty_field_is_not_cleared() -> Result<(), FormError> {
    let widget = MemoryElement::edit("");
    let edit = EditElement::new(widget.clone());

    edit.set_value(&"abc".into())?;

    assert_eq!(widget.actions(), vec![FOCUS, text("abc")]);
    Ok(())
}

#[test]
fn test_edit_custom_clear_keys_and_set_empty() -> Result<(), FormError> {
    let widget = MemoryElement::edit("old");
    let edit = EditElement::builder(widget.clone())
        .clear_strategy(ClearStrategy::Keys(vec!["END".into(), "CTRL+A".into(), "BACKSPACE".into()]))
        .build()?;
    edit.set_value(&"new".into())?;
    assert_eq!(
        widget.actions(),
        vec![FOCUS, key("END"), key("CTRL+A"), key("BACKSPACE"), text("new")]
    );
    assert_eq!(widget.content(), "new");

    let widget = MemoryElement::edit("old");
    let edit = EditElement::builder(widget.clone())
        .clear_strategy(ClearStrategy::SetEmpty)
        .build()?;
    edit.set_value(&"new".into())?;
    assert_eq!(
        widget.actions(),
        vec![FOCUS, MemoryAction::SetRawValue(String::new()), text("new")]
    );
    Ok(())
}

#[test]
fn test_edit_without_clearing_appends() -> Result<(), FormError> {
    let widget = MemoryElement::edit("ab");
    let edit = EditElement::builder(widget.clone())
        .clear_strategy(ClearStrategy::Nothing)
        .build()?;

    edit.set_value(&"c".into())?;

    assert_eq!(widget.actions(), vec![FOCUS, text("c")]);
    assert_eq!(widget.content(), "abc");
    Ok(())
}

#[test]
fn test_edit_value_sources() -> Result<(), FormError> {
    let widget = MemoryElement::edit("content").with_label("Label");
    let by_name = EditElement::builder(widget.clone())
        .value_source(ValueSource::Name)
        .build()?;
    assert_eq!(by_name.value()?, FieldValue::from("Label"));

    let widget = MemoryElement::edit("line").with_trailing_newline();
    let by_text = EditElement::builder(widget.clone())
        .value_source(ValueSource::TextValue)
        .build()?;
    assert_eq!(by_text.value()?, FieldValue::from("line"));

    // The stripped newline must not defeat the no-op check.
    by_text.set_value(&"line".into())?;
    assert_eq!(widget.action_count(), 0);
    Ok(())
}

#[test]
fn test_edit_pasting_goes_through_clipboard() -> Result<(), FormError> {
    let clipboard = MemoryClipboard::new();
    let widget = MemoryElement::edit("").with_clipboard(clipboard.clone());
    let edit = EditElement::builder(widget.clone())
        .send_method(SendMethod::Pasting)
        .clipboard(Arc::new(clipboard.clone()))
        .build()?;

    edit.set_value(&"pasted".into())?;

    assert_eq!(widget.actions(), vec![FOCUS, key("CTRL+V")]);
    assert_eq!(widget.content(), "pasted");
    assert_eq!(clipboard.text(), "pasted");
    assert!(edit.clipboard().is_some());
    Ok(())
}

#[test]
fn test_edit_direct_assignment() -> Result<(), FormError> {
    let widget = MemoryElement::edit("");
    let edit = EditElement::builder(widget.clone())
        .send_method(SendMethod::Direct)
        .focus_mode(FocusMode::None)
        .build()?;

    edit.set_value(&"direct".into())?;

    assert_eq!(
        widget.actions(),
        vec![
            MemoryAction::Focus(FocusMode::None),
            MemoryAction::SetRawValue("direct".to_string())
        ]
    );
    assert!(edit.clipboard().is_none());
    Ok(())
}

#[test]
fn test_pasting_requires_clipboard() {
    let result = EditElement::builder(MemoryElement::edit(""))
        .send_method(SendMethod::Pasting)
        .build();
    assert!(matches!(result, Err(FormError::InvalidArgument(_))));

    let result = PasswordElement::builder(MemoryElement::edit(""))
        .send_method(SendMethod::Pasting)
        .build();
    assert!(matches!(result, Err(FormError::InvalidArgument(_))));
}

#[test]
fn test_edit_rejects_flag_value() {
    let widget = MemoryElement::edit("");
    let edit = EditElement::new(widget.clone());

    let result = edit.set_value(&true.into());

    assert!(matches!(result, Err(FormError::ValueType(_))));
    assert_eq!(widget.action_count(), 0);
}

#[test]
fn test_password_is_write_only_and_hidden() -> Result<(), FormError> {
    let widget = MemoryElement::edit("");
    let password = PasswordElement::new(widget.clone());

    password.set_value(&"1234".into())?;

    assert_eq!(widget.content(), "1234");
    assert_eq!(password.value()?, FieldValue::from(""));
    assert!(!password.allow_check());
    assert!(!password.show_in_log());
    Ok(())
}

#[test]
fn test_password_always_clears() -> Result<(), FormError> {
    let widget = MemoryElement::edit("1234");
    let password = PasswordElement::builder(widget.clone())
        .text_action(TextAction::HwScanVirtual)
        .build()?;

    password.set_value(&"1234".into())?;

    assert_eq!(
        widget.actions(),
        vec![FOCUS, key("CTRL+A"), key("DEL"), text("1234")]
    );
    assert_eq!(widget.content(), "1234");
    Ok(())
}

#[test]
fn test_password_refuses_to_skip_clearing() {
    let result = PasswordElement::builder(MemoryElement::edit(""))
        .clear_strategy(ClearStrategy::Nothing)
        .build();
    assert!(matches!(result, Err(FormError::InvalidArgument(_))));
}

#[test]
fn test_check_clicks_only_on_change() -> Result<(), FormError> {
    let widget = MemoryElement::check_box(true);
    let check = CheckElement::new(widget.clone());

    check.set_value(&true.into())?;
    assert_eq!(widget.action_count(), 0);

    check.set_value(&false.into())?;
    assert_eq!(widget.actions(), vec![FOCUS, MemoryAction::Click]);
    assert_eq!(check.value()?, FieldValue::Flag(false));
    Ok(())
}

#[test]
fn test_check_rejects_text() {
    let widget = MemoryElement::check_box(false);
    let check = CheckElement::new(widget.clone());

    let result = check.set_value(&"True".into());

    assert!(matches!(result, Err(FormError::ValueType(_))));
    assert_eq!(widget.action_count(), 0);
}

#[test]
fn test_radio_accepts_only_true() -> Result<(), FormError> {
    let widget = MemoryElement::radio_button(false);
    let radio = RadioElement::new(widget.clone());

    assert!(matches!(
        radio.set_value(&false.into()),
        Err(FormError::ValueType(_))
    ));
    assert!(matches!(
        radio.set_value(&"True".into()),
        Err(FormError::ValueType(_))
    ));
    assert_eq!(widget.action_count(), 0);

    radio.set_value(&true.into())?;
    assert_eq!(widget.actions(), vec![FOCUS, MemoryAction::Click]);
    assert!(widget.selected());

    widget.clear_actions();
    radio.set_value(&true.into())?;
    assert_eq!(widget.action_count(), 0, "already selected");
    Ok(())
}

#[test]
fn test_combo_walk_reaches_target() -> Result<(), FormError> {
    let options = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
    let widget = MemoryElement::combo_box(&options, Some(4));
    let combo = ComboElement::builder(widget.clone())
        .strategy(ComboStrategy::Walk)
        .build();

    combo.set_value(&"Wednesday".into())?;

    assert_eq!(widget.content(), "Wednesday");
    assert_eq!(
        widget.actions(),
        vec![FOCUS, key("HOME"), key("DOWN"), key("DOWN")]
    );
    Ok(())
}

#[test]
fn test_combo_walk_converges_within_option_count() -> Result<(), FormError> {
    let options = ["a", "b", "c", "d", "e", "f"];
    for target in options {
        let widget = MemoryElement::combo_box(&options, None);
        let combo = ComboElement::builder(widget.clone())
            .strategy(ComboStrategy::Walk)
            .build();

        combo.set_value(&target.into())?;

        let downs = widget
            .actions()
            .iter()
            .filter(|a| **a == key("DOWN"))
            .count();
        assert!(downs < options.len(), "{target} took {downs} presses");
        assert_eq!(widget.content(), target);
    }
    Ok(())
}

#[test]
fn test_combo_walk_detects_missing_option() {
    let widget = MemoryElement::combo_box(&["A", "B", "C"], Some(1));
    let combo = ComboElement::builder(widget.clone())
        .strategy(ComboStrategy::Walk)
        .build();

    let result = combo.set_value(&"X".into());

    assert!(matches!(result, Err(FormError::UnableToSetValue(_))));
    // A, B, C, then C twice more while stuck on the last option.
    let downs = widget
        .actions()
        .iter()
        .filter(|a| **a == key("DOWN"))
        .count();
    assert_eq!(downs, 4);
}

#[test]
fn test_combo_walk_detects_missing_option_when_wrapping() {
    let widget = MemoryElement::combo_box(&["A", "B", "C"], None).wrapping();
    let combo = ComboElement::builder(widget.clone())
        .strategy(ComboStrategy::Walk)
        .build();

    let result = combo.set_value(&"X".into());

    assert!(matches!(result, Err(FormError::UnableToSetValue(_))));
    let downs = widget
        .actions()
        .iter()
        .filter(|a| **a == key("DOWN"))
        .count();
    assert_eq!(downs, 6, "A is seen a third time after two full cycles");
}

#[test]
fn test_combo_typing_and_direct() -> Result<(), FormError> {
    let widget = MemoryElement::combo_box(&["Mon", "Tue"], Some(0));
    let combo = ComboElement::new(widget.clone());
    combo.set_value(&"Mon".into())?;
    assert_eq!(widget.action_count(), 0);
    combo.set_value(&"Tue".into())?;
    assert_eq!(widget.actions(), vec![FOCUS, text("Tue")]);

    let widget = MemoryElement::combo_box(&["Mon", "Tue"], Some(0));
    let combo = ComboElement::builder(widget.clone())
        .strategy(ComboStrategy::Direct)
        .build();
    combo.set_value(&"Tue".into())?;
    assert_eq!(
        widget.actions(),
        vec![FOCUS, MemoryAction::SetRawValue("Tue".to_string())]
    );
    assert_eq!(combo.value()?, FieldValue::from("Tue"));
    Ok(())
}

#[test]
fn test_driver_errors_propagate_unchanged() {
    let widget = MemoryElement::check_box(false)
        .failing_focus(AutomationError::ElementNotEnabled("terms".to_string()));
    let check = CheckElement::new(widget);

    let result = check.set_value(&true.into());

    assert!(matches!(
        result,
        Err(FormError::Automation(AutomationError::ElementNotEnabled(_)))
    ));
}

#[test]
fn test_invalid_configuration_choices() {
    assert!(matches!(
        "valu".parse::<ValueSource>(),
        Err(FormError::InvalidArgument(_))
    ));
    assert!(matches!(
        "write".parse::<SendMethod>(),
        Err(FormError::InvalidArgument(_))
    ));
    assert!(matches!(
        "keyboard".parse::<FocusMode>(),
        Err(FormError::InvalidArgument(_))
    ));
    assert!(matches!(
        "jump".parse::<ComboStrategy>(),
        Err(FormError::InvalidArgument(_))
    ));
    assert!(matches!(
        "ctrl-a".parse::<ClearStrategy>(),
        Err(FormError::InvalidArgument(_))
    ));
}

#[test]
fn test_misspelled_clear_strategy_is_rejected() {
    for choice in ["nothing", "empty", "setempty", "clear", "keys_please", "ctrl+", "a,,b"] {
        let parsed = choice.parse::<ClearStrategy>();
        assert!(
            matches!(parsed, Err(FormError::InvalidArgument(_))),
            "{choice:?} should not parse, got {parsed:?}"
        );
    }
}

#[test]
fn test_clear_key_lists_parse() -> Result<(), FormError> {
    assert_eq!(
        "backspace".parse::<ClearStrategy>()?,
        ClearStrategy::Keys(vec!["BACKSPACE".to_string()])
    );
    assert_eq!(
        "ctrl + a,f2,end".parse::<ClearStrategy>()?,
        ClearStrategy::Keys(vec![
            "CTRL+A".to_string(),
            "F2".to_string(),
            "END".to_string()
        ])
    );
    Ok(())
}

#[test]
fn test_configuration_choices_parse() -> Result<(), FormError> {
    assert_eq!("text_value".parse::<ValueSource>()?, ValueSource::TextValue);
    assert_eq!("writing".parse::<SendMethod>()?, SendMethod::Typing);
    assert_eq!("pasting".parse::<SendMethod>()?, SendMethod::Pasting);
    assert_eq!("wm_char".parse::<TextAction>()?, TextAction::WmChar);
    assert_eq!("set_empty".parse::<ClearStrategy>()?, ClearStrategy::SetEmpty);
    assert_eq!(
        "ctrl+a, backspace".parse::<ClearStrategy>()?,
        ClearStrategy::Keys(vec!["CTRL+A".to_string(), "BACKSPACE".to_string()])
    );
    Ok(())
}
