//! End-to-end rendering behavior through the public API.

use std::cell::RefCell;

use tagfmt::{apply_format, render, MapResolver, Renderer, UnknownKeyBehavior};

fn fixed(value: &'static str) -> impl FnMut(&str) -> String {
    move |_| value.to_string()
}

#[test]
fn text_without_brackets_is_unchanged() {
    let text = "no placeholders here: just text, colons and 1.5 numbers";
    assert_eq!(render(text, fixed("X")), text);
}

#[test]
fn escapes_become_brackets() {
    assert_eq!(render(r"\[literal\]", fixed("X")), "[literal]");
}

#[test]
fn empty_directive_passes_through() {
    assert_eq!(render("a[]b", fixed("X")), "a[]b");
}

#[test]
fn negate_chain() {
    let resolver = |key: &str| if key == "x" { "3".into() } else { String::new() };
    assert_eq!(render("[x:Negate]", resolver), "-3");
}

#[test]
fn stat_formatting() {
    assert_eq!(apply_format("0", "Stat"), "0");
    assert_eq!(apply_format("1.5", "Stat"), "+1.5");
    assert_eq!(apply_format("-1.5", "Stat"), "-1.5");
    assert_eq!(apply_format("0.25", "StatPercent"), "+25%");
}

#[test]
fn thousands_pattern() {
    let resolver = |key: &str| if key == "n" { "1234".into() } else { String::new() };
    assert_eq!(render("[n:#,0]", resolver), "1,234");
}

#[test]
fn resolver_called_once_per_directive_in_order() {
    let calls = RefCell::new(Vec::new());
    let resolver = |key: &str| {
        calls.borrow_mut().push(key.to_string());
        match key {
            "a" => "1".to_string(),
            "b" => "2".to_string(),
            _ => String::new(),
        }
    };

    assert_eq!(render("[a][b]", resolver), "12");
    assert_eq!(*calls.borrow(), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn repeated_keys_are_not_memoized() {
    let mut counter = 0;
    let resolver = |_: &str| {
        counter += 1;
        counter.to_string()
    };
    assert_eq!(render("[k] [k] [k]", resolver), "1 2 3");
}

#[test]
fn rerendering_plain_output_is_identity() {
    let mut vars = MapResolver::new().with("hp", "12").with("max", "40");
    let renderer = Renderer::new();
    let once = renderer.render("HP [hp]/[max:0.0]", &mut vars);
    assert_eq!(once, "HP 12/40.0");
    assert_eq!(renderer.render(&once, &mut vars), once);
}

#[test]
fn empty_resolved_value_is_used() {
    assert_eq!(render("<[x]>", fixed("")), "<>");
}

#[test]
fn mixed_template() {
    let mut vars = MapResolver::new()
        .with("name", "Ada")
        .with("gold", "1234567.891")
        .with("crit", "0.125")
        .with("armor", "-3.5")
        .unknown_behavior(UnknownKeyBehavior::Indicate("?".to_string()));

    let out = Renderer::new().render(
        r"[name]: [gold:#,0.00] gold, crit [crit:StatPercent], armor [armor:Abs:Stat], [who] \[ok\]",
        &mut vars,
    );
    assert_eq!(
        out,
        "Ada: 1,234,567.89 gold, crit +12.5%, armor +3.5, ?who [ok]"
    );
}

#[test]
fn renderer_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Renderer>();

    let renderer = std::sync::Arc::new(Renderer::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let renderer = renderer.clone();
            std::thread::spawn(move || {
                let mut resolver = move |_: &str| i.to_string();
                renderer.render("[v:Negate]", &mut resolver)
            })
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec!["0", "-1", "-2", "-3"]);
}

#[test]
fn arithmetic_chain_prints_short_decimals() {
    let mut vars = MapResolver::new().with("luck", "0.9").with("armor", "1.1");
    let out = Renderer::new().render("[luck:OneMinus] [armor:MinusOne:Negate]", &mut vars);
    assert_eq!(out, "0.1 -0.1");
}

#[test]
fn names_spelled_like_nan_stay_text() {
    let mut vars = MapResolver::new().with("name", "Nan");
    assert_eq!(Renderer::new().render("[name:Negate]", &mut vars), "Nan");
}
