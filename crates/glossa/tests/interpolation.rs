//! Tests for the template formatter: the four placeholder styles, unbound
//! placeholders, and value rendering.

use glossa::{DefaultFormatter, Formatter, bindings};

#[test]
fn percent_brace_style() {
    let out = DefaultFormatter.interpolate("Hello, %{name}!", &bindings! { "name" => "Alice" });
    assert_eq!(out, "Hello, Alice!");
}

#[test]
fn dollar_brace_style() {
    let out = DefaultFormatter.interpolate("Hello, ${name}!", &bindings! { "name" => "Bob" });
    assert_eq!(out, "Hello, Bob!");
}

#[test]
fn double_brace_style() {
    let out = DefaultFormatter.interpolate("Hello, {{name}}!", &bindings! { "name" => "Carol" });
    assert_eq!(out, "Hello, Carol!");
}

#[test]
fn bare_brace_style() {
    let out = DefaultFormatter.interpolate("Hello, {name}!", &bindings! { "name" => "Dave" });
    assert_eq!(out, "Hello, Dave!");
}

#[test]
fn mixed_styles_in_one_template() {
    let out = DefaultFormatter.interpolate(
        "%{a} ${b} {{c}} {d}",
        &bindings! { "a" => 1, "b" => 2, "c" => 3, "d" => 4 },
    );
    assert_eq!(out, "1 2 3 4");
}

#[test]
fn unbound_placeholders_stay_verbatim() {
    let out = DefaultFormatter.interpolate(
        "%{known} and %{unknown}",
        &bindings! { "known" => "yes" },
    );
    assert_eq!(out, "yes and %{unknown}");
}

#[test]
fn unbound_styles_keep_their_original_delimiters() {
    let out = DefaultFormatter.interpolate("${x} {{y}} {z}", &bindings! {});
    assert_eq!(out, "${x} {{y}} {z}");
}

#[test]
fn literal_sigils_pass_through() {
    let out = DefaultFormatter.interpolate("100% done, $5 each, { }", &bindings! {});
    assert_eq!(out, "100% done, $5 each, { }");
}

#[test]
fn malformed_placeholder_is_literal() {
    let out = DefaultFormatter.interpolate("%{not closed", &bindings! { "not" => "x" });
    assert_eq!(out, "%{not closed");
}

#[test]
fn numeric_and_float_values_render() {
    let out = DefaultFormatter.interpolate(
        "%{count} items at %{price}",
        &bindings! { "count" => 3, "price" => 9.5 },
    );
    assert_eq!(out, "3 items at 9.5");
}

#[test]
fn underscored_names_are_accepted() {
    let out =
        DefaultFormatter.interpolate("%{first_name}", &bindings! { "first_name" => "Eve" });
    assert_eq!(out, "Eve");
}

#[test]
fn empty_braces_are_literal() {
    let out = DefaultFormatter.interpolate("a {} b %{} c", &bindings! {});
    assert_eq!(out, "a {} b %{} c");
}

#[test]
fn plural_index_selection() {
    assert_eq!(DefaultFormatter.plural_index(None), 1);
    assert_eq!(DefaultFormatter.plural_index(Some(1)), 1);
    assert_eq!(DefaultFormatter.plural_index(Some(0)), 0);
    assert_eq!(DefaultFormatter.plural_index(Some(2)), 0);
    assert_eq!(DefaultFormatter.plural_index(Some(-1)), 0);
}
