//! Declaration-shape matchers.
//!
//! Each [`Matcher`] recognizes one declaration shape on a (possibly joined)
//! line and extracts its named fields into a [`Signature`]. Matchers are
//! always tried as an ordered list and the first hit wins; more specific
//! shapes (`enum class`, `data class`) come before `class`.

use crate::model::{SymbolKind, Visibility};
use crate::normalize::{mask_comments, mask_structural};
use regex::Regex;
use std::sync::LazyLock;

// -- Pattern fragments --------------------------------------------------------

macro_rules! annotation {
    () => {
        r"@[A-Za-z_][\w.]*(?::[A-Za-z_]\w*)?(?:\([^)]*\))?"
    };
}

macro_rules! modifier {
    () => {
        concat!(
            "public|private|internal|protected|open|final|abstract|sealed|override|",
            "inner|annotation|value|inline|suspend|operator|infix|tailrec|external|",
            "lateinit|const|actual|expect|crossinline|noinline|vararg|reified"
        )
    };
}

macro_rules! prefix {
    () => {
        concat!(
            r"^\s*(?P<mods>(?:(?:",
            annotation!(),
            "|(?:",
            modifier!(),
            r"))\s+)*)"
        )
    };
}

// Letters of any script, or a backtick-quoted name.
macro_rules! ident {
    () => {
        r"(?:[\p{L}_][\p{L}\p{N}_]*|`[^`]+`)"
    };
}

// Up to two levels of nested angle brackets.
macro_rules! angle {
    () => {
        r"<(?:[^<>]|<(?:[^<>]|<[^<>]*>)*>)*>"
    };
}

// Optional receiver chain in front of a name: `String.`, `List<T>.`, `Foo?.`.
macro_rules! receiver_name {
    () => {
        concat!(r"(?:", ident!(), r"(?:<[^>]*>)?\??\.)*", ident!())
    };
}

macro_rules! container_re {
    ($kind:expr) => {
        LazyLock::new(|| {
            Regex::new(concat!(
                prefix!(),
                $kind,
                r"\s+(?P<name>",
                ident!(),
                r")(?P<tail>.*)$"
            ))
            .unwrap()
        })
    };
}

// -- Regex patterns -----------------------------------------------------------

static RE_ENUM_CLASS: LazyLock<Regex> = container_re!(r"(?P<kind>enum\s+class)");
static RE_DATA_CLASS: LazyLock<Regex> = container_re!(r"(?P<kind>data\s+class)");
static RE_INTERFACE: LazyLock<Regex> = container_re!(r"(?:fun\s+)?(?P<kind>interface)");
static RE_EXTENSION: LazyLock<Regex> = container_re!(r"(?P<kind>extension)");
static RE_CLASS: LazyLock<Regex> = container_re!(r"(?P<kind>class|object)");

static RE_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        prefix!(),
        r"fun\s+(?:(?P<generic>",
        angle!(),
        r")\s*)?(?P<name>",
        receiver_name!(),
        r")(?P<tail>.*)$"
    ))
    .unwrap()
});

static RE_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        prefix!(),
        r"(?P<kind>val|var)\s+(?:(?P<generic>",
        angle!(),
        r")\s*)?(?P<name>",
        receiver_name!(),
        r")(?P<tail>.*)$"
    ))
    .unwrap()
});

static RE_CONSTRUCTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(prefix!(), r"constructor\s*(?P<tail>\(.*)$")).unwrap()
});

static RE_INITIALIZER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*init\s*(?:\{.*)?$").unwrap());

static RE_ENUM_CASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*(?P<mods>(?:",
        annotation!(),
        r"\s+)*)(?P<name>",
        ident!(),
        r")\s*(?P<tail>.*)$"
    ))
    .unwrap()
});

static RE_COMPANION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(concat!(prefix!(), r"companion\s+object\b")).unwrap());

// Keywords that end the case list of an enum body.
static RE_ENUM_STOP_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        prefix!(),
        r"(?:fun|val|var|init|constructor|companion|class|object|interface|enum|data|typealias)\b"
    ))
    .unwrap()
});

// Optional visibility/annotations and `constructor` keyword in front of a
// primary-constructor list.
static RE_PRIMARY_CONSTRUCTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*(?P<mods>(?:(?:",
        annotation!(),
        r"|public|private|internal|protected)\s+)*)(?:constructor\s*)?\("
    ))
    .unwrap()
});

static RE_PARAMETER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        prefix!(),
        r"(?:(?P<binding>val|var)\s+)?(?P<name>",
        ident!(),
        r")\s*(?P<rest>:.*)?$"
    ))
    .unwrap()
});

static RE_MODIFIER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(concat!(annotation!(), r"|[a-z]+")).unwrap());

static RE_WHERE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bwhere\b").unwrap());

static RE_ACCESSOR_OR_DELEGATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:by|get|set)\b").unwrap());

// -- Matchers -----------------------------------------------------------------

/// One declaration shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    EnumClass,
    DataClass,
    Interface,
    Extension,
    /// `class` or `object`.
    Class,
    Function,
    Constructor,
    Initializer,
    Property,
    EnumCase,
}

/// Container declarations, most specific first.
pub const CONTAINER_MATCHERS: &[Matcher] = &[
    Matcher::EnumClass,
    Matcher::DataClass,
    Matcher::Interface,
    Matcher::Extension,
    Matcher::Class,
];

/// Declarations recognized by the file-level scan.
pub const TOP_LEVEL_MATCHERS: &[Matcher] = &[
    Matcher::EnumClass,
    Matcher::DataClass,
    Matcher::Interface,
    Matcher::Extension,
    Matcher::Class,
    Matcher::Function,
];

/// Declarations recognized inside a container body.
pub const MEMBER_MATCHERS: &[Matcher] = &[
    Matcher::Function,
    Matcher::Constructor,
    Matcher::Initializer,
    Matcher::Property,
];

/// Declarations recognized in the case list of an enum body.
pub const ENUM_CASE_MATCHERS: &[Matcher] = &[Matcher::EnumCase];

/// Fields captured from one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub kind: Option<SymbolKind>,
    pub visibility: Visibility,
    pub modifiers: Vec<String>,
    pub name: String,
    pub type_parameter: Option<String>,
    /// Parameter list and return/type annotation, as written.
    pub raw_remainder: Option<String>,
    /// Enum case argument or literal; property initializer.
    pub raw_value: Option<String>,
    pub inheritance: Option<String>,
    pub where_clause: Option<String>,
    /// Primary-constructor parameter list without the parentheses.
    pub constructor_params: Option<String>,
    pub constructor_visibility: Visibility,
}

impl Signature {
    /// Kind of the matched declaration.
    pub fn symbol_kind(&self) -> SymbolKind {
        self.kind.unwrap_or(SymbolKind::Function)
    }
}

impl Matcher {
    /// Try to match `line` as this declaration shape.
    pub fn try_match(self, line: &str) -> Option<Signature> {
        let text = mask_comments(line);
        let text = text.trim_end();
        match self {
            Self::EnumClass => match_container(&RE_ENUM_CLASS, text),
            Self::DataClass => match_container(&RE_DATA_CLASS, text),
            Self::Interface => match_container(&RE_INTERFACE, text),
            Self::Extension => match_container(&RE_EXTENSION, text),
            Self::Class => match_container(&RE_CLASS, text),
            Self::Function => match_function(text),
            Self::Constructor => match_constructor(text),
            Self::Initializer => RE_INITIALIZER.is_match(text).then(|| Signature {
                kind: Some(SymbolKind::Initializer),
                name: "init".to_string(),
                ..Default::default()
            }),
            Self::Property => match_property(text),
            Self::EnumCase => match_enum_case(text),
        }
    }
}

/// Try `matchers` in order and return the first match.
pub fn match_declaration(matchers: &[Matcher], line: &str) -> Option<Signature> {
    matchers.iter().find_map(|m| m.try_match(line))
}

/// True for a `companion object` header.
pub fn is_companion(line: &str) -> bool {
    RE_COMPANION.is_match(&mask_comments(line))
}

/// True if the line starts a declaration that cannot be an enum case.
pub fn is_enum_stop_word(line: &str) -> bool {
    RE_ENUM_STOP_WORD.is_match(&mask_comments(line))
}

// -- Shape-specific extraction ------------------------------------------------

fn match_container(re: &Regex, text: &str) -> Option<Signature> {
    let caps = re.captures(text)?;
    let kind = match caps["kind"].split_whitespace().next()? {
        "enum" => SymbolKind::EnumClass,
        "data" => SymbolKind::DataClass,
        "interface" => SymbolKind::Interface,
        "extension" => SymbolKind::Extension,
        "object" => SymbolKind::Object,
        _ => SymbolKind::Class,
    };
    let modifiers = modifier_tokens(&caps["mods"]);
    let tail = parse_header_tail(&caps["tail"]);
    Some(Signature {
        kind: Some(kind),
        visibility: Visibility::from_modifiers(modifiers.iter().map(String::as_str)),
        modifiers,
        name: caps["name"].to_string(),
        type_parameter: tail.type_parameter,
        inheritance: tail.inheritance,
        where_clause: tail.where_clause,
        constructor_params: tail.constructor_params,
        constructor_visibility: tail.constructor_visibility,
        ..Default::default()
    })
}

fn match_function(text: &str) -> Option<Signature> {
    let caps = RE_FUNCTION.captures(text)?;
    let name = &caps["name"];
    // `fun interface` is a container.
    if name == "interface" {
        return None;
    }
    let tail = &caps["tail"];
    let masked = mask_structural(tail);
    let cut = find_top_level(&masked, |c, _| matches!(c, '{' | '}' | '=')).unwrap_or(tail.len());
    let modifiers = modifier_tokens(&caps["mods"]);
    Some(Signature {
        kind: Some(SymbolKind::Function),
        visibility: Visibility::from_modifiers(modifiers.iter().map(String::as_str)),
        modifiers,
        name: name.to_string(),
        type_parameter: caps.name("generic").map(|m| m.as_str().to_string()),
        raw_remainder: non_empty(&tail[..cut]),
        ..Default::default()
    })
}

fn match_property(text: &str) -> Option<Signature> {
    let caps = RE_PROPERTY.captures(text)?;
    let kind = if &caps["kind"] == "var" {
        SymbolKind::Var
    } else {
        SymbolKind::Val
    };
    let tail = &caps["tail"];
    let masked = mask_structural(tail);

    // A `}` closes a one-line container body.
    let mut cut =
        find_top_level(&masked, |c, _| matches!(c, '{' | '}' | '=')).unwrap_or(tail.len());
    if let Some(m) = RE_ACCESSOR_OR_DELEGATE.find(&masked[..cut]) {
        cut = m.start();
    }
    let raw_value = if masked[cut..].starts_with('=') {
        let value = &tail[cut + 1..];
        let value_masked = &masked[cut + 1..];
        let end =
            find_top_level(value_masked, |c, _| matches!(c, '{' | '}')).unwrap_or(value.len());
        non_empty(&value[..end])
    } else {
        None
    };

    let modifiers = modifier_tokens(&caps["mods"]);
    Some(Signature {
        kind: Some(kind),
        visibility: Visibility::from_modifiers(modifiers.iter().map(String::as_str)),
        modifiers,
        name: caps["name"].to_string(),
        type_parameter: caps.name("generic").map(|m| m.as_str().to_string()),
        raw_remainder: non_empty(&tail[..cut]),
        raw_value,
        ..Default::default()
    })
}

fn match_constructor(text: &str) -> Option<Signature> {
    let caps = RE_CONSTRUCTOR.captures(text)?;
    let tail = &caps["tail"];
    let masked = mask_structural(tail);
    // Skip the parameter list before looking for the body brace.
    let params_end = matching_close(&masked, 0, '(', ')').map_or(tail.len(), |i| i + 1);
    let cut = find_top_level(&masked[params_end..], |c, _| matches!(c, '{' | '}'))
        .map_or(tail.len(), |i| params_end + i);
    let modifiers = modifier_tokens(&caps["mods"]);
    Some(Signature {
        kind: Some(SymbolKind::Constructor),
        visibility: Visibility::from_modifiers(modifiers.iter().map(String::as_str)),
        modifiers,
        name: "constructor".to_string(),
        raw_remainder: non_empty(&tail[..cut]),
        ..Default::default()
    })
}

fn match_enum_case(text: &str) -> Option<Signature> {
    let caps = RE_ENUM_CASE.captures(text)?;
    let tail = caps["tail"].trim();
    let masked = mask_structural(tail);

    let raw_value = match tail.chars().next() {
        None | Some('{' | ',' | ';' | '}') => None,
        Some('(') => {
            let close = matching_close(&masked, 0, '(', ')').unwrap_or(tail.len());
            non_empty(&tail[1..close])
        }
        Some('=') => {
            let end = find_top_level(&masked[1..], |c, _| c == '{' || c == ',')
                .map_or(tail.len(), |i| i + 1);
            non_empty(&tail[1..end])
        }
        Some(_) => return None,
    };

    Some(Signature {
        kind: Some(SymbolKind::EnumCase),
        modifiers: modifier_tokens(&caps["mods"]),
        name: caps["name"].to_string(),
        raw_value,
        ..Default::default()
    })
}

// -- Container header tail ----------------------------------------------------

#[derive(Debug, Default)]
struct HeaderTail {
    type_parameter: Option<String>,
    constructor_params: Option<String>,
    constructor_visibility: Visibility,
    inheritance: Option<String>,
    where_clause: Option<String>,
}

/// Split what follows a container name into generics, primary constructor,
/// supertypes and `where` clause.
fn parse_header_tail(tail: &str) -> HeaderTail {
    let masked = mask_structural(tail);
    let mut out = HeaderTail::default();
    let mut pos = skip_blank(&masked, 0);

    if masked[pos..].starts_with('<') {
        let close = matching_close(&masked, pos, '<', '>').unwrap_or(masked.len() - 1);
        out.type_parameter = non_empty(&tail[pos..=close]);
        pos = skip_blank(&masked, close + 1);
    }

    if let Some(caps) = RE_PRIMARY_CONSTRUCTOR.captures(&masked[pos..]) {
        let open = pos + caps[0].len() - 1;
        let mods = modifier_tokens(&caps["mods"]);
        out.constructor_visibility = Visibility::from_modifiers(mods.iter().map(String::as_str));
        match matching_close(&masked, open, '(', ')') {
            Some(close) => {
                out.constructor_params = Some(tail[open + 1..close].trim().to_string());
                pos = skip_blank(&masked, close + 1);
            }
            None => {
                out.constructor_params = Some(tail[open + 1..].trim().to_string());
                return out;
            }
        }
    }

    let body = find_top_level(&masked[pos..], |c, _| c == '{').map_or(tail.len(), |i| pos + i);
    let header = &masked[pos..body];
    let where_at = RE_WHERE.find(header).map(|m| pos + m.start());

    if masked[pos..].starts_with(':') {
        let end = where_at.unwrap_or(body);
        out.inheritance = non_empty(&tail[pos + 1..end]);
    }
    if let Some(at) = where_at {
        out.where_clause = non_empty(&tail[at + "where".len()..body]);
    }
    out
}

// -- Parameters ---------------------------------------------------------------

/// `val` or `var` on a primary-constructor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Val,
    Var,
}

/// One parameter of a parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub modifiers: Vec<String>,
    pub visibility: Visibility,
    pub binding: Option<Binding>,
    pub name: String,
    /// Type annotation and default value, starting at `:`.
    pub remainder: Option<String>,
}

impl Parameter {
    /// A public `val`/`var` parameter, which is also a property.
    pub fn is_disclosed(&self) -> bool {
        self.binding.is_some() && self.visibility.is_public()
    }
}

/// Split a parameter list on commas that are not nested in brackets,
/// braces or type arguments.
pub fn split_parameters(list: &str) -> Vec<&str> {
    let masked = mask_structural(list);
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let mut prev = ' ';
    for (i, c) in masked.char_indices() {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            // `->` in a function type is not a closing angle bracket.
            '>' if prev == '-' => {}
            ')' | ']' | '}' | '>' => depth -= 1,
            ',' if depth <= 0 => {
                parts.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        prev = c;
    }
    parts.push(list[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

/// Parse `[modifiers] [val|var] name: Type = default`.
pub fn parse_parameter(text: &str) -> Option<Parameter> {
    let caps = RE_PARAMETER.captures(text.trim())?;
    let modifiers = modifier_tokens(&caps["mods"]);
    let binding = caps.name("binding").map(|m| match m.as_str() {
        "var" => Binding::Var,
        _ => Binding::Val,
    });
    Some(Parameter {
        visibility: Visibility::from_modifiers(modifiers.iter().map(String::as_str)),
        modifiers,
        binding,
        name: caps["name"].to_string(),
        remainder: caps.name("rest").and_then(|m| non_empty(m.as_str())),
    })
}

// -- Helpers ------------------------------------------------------------------

fn modifier_tokens(mods: &str) -> Vec<String> {
    RE_MODIFIER_TOKEN
        .find_iter(mods)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn skip_blank(masked: &str, from: usize) -> usize {
    masked[from..]
        .find(|c: char| !c.is_whitespace())
        .map_or(masked.len(), |i| from + i)
}

/// Index of the bracket closing the one at `open`.
fn matching_close(masked: &str, open: usize, open_c: char, close_c: char) -> Option<usize> {
    let mut depth = 0i32;
    for (i, c) in masked[open..].char_indices() {
        if c == open_c {
            depth += 1;
        } else if c == close_c {
            depth -= 1;
            if depth == 0 {
                return Some(open + i);
            }
        }
    }
    None
}

/// First byte offset where `pred` holds outside `()` and `[]` nesting.
fn find_top_level(masked: &str, pred: impl Fn(char, usize) -> bool) -> Option<usize> {
    let mut depth = 0i32;
    for (i, c) in masked.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth -= 1,
            _ if depth <= 0 && pred(c, i) => return Some(i),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top(line: &str) -> Signature {
        match_declaration(TOP_LEVEL_MATCHERS, line).expect("no match")
    }

    fn member(line: &str) -> Signature {
        match_declaration(MEMBER_MATCHERS, line).expect("no match")
    }

    #[test]
    fn enum_class_before_class() {
        let sig = top("enum class Color { RED, GREEN }");
        assert_eq!(sig.kind, Some(SymbolKind::EnumClass));
        assert_eq!(sig.name, "Color");
    }

    #[test]
    fn data_class_with_primary_constructor() {
        let sig = top("data class Point(val x: Int, val y: Int) : Shape, Serializable {");
        assert_eq!(sig.kind, Some(SymbolKind::DataClass));
        assert_eq!(sig.name, "Point");
        assert_eq!(sig.constructor_params.as_deref(), Some("val x: Int, val y: Int"));
        assert_eq!(sig.inheritance.as_deref(), Some("Shape, Serializable"));
    }

    #[test]
    fn class_with_modifiers_and_generics() {
        let sig = top("internal abstract class Repo<T : Any> : Base<T>() where T : Comparable<T> {");
        assert_eq!(sig.kind, Some(SymbolKind::Class));
        assert_eq!(sig.visibility, Visibility::Internal);
        assert_eq!(sig.modifiers, vec!["internal", "abstract"]);
        assert_eq!(sig.type_parameter.as_deref(), Some("<T : Any>"));
        assert_eq!(sig.inheritance.as_deref(), Some("Base<T>()"));
        assert_eq!(sig.where_clause.as_deref(), Some("T : Comparable<T>"));
        assert_eq!(sig.constructor_params, None);
    }

    #[test]
    fn open_class_is_public() {
        let sig = top("open class Base");
        assert_eq!(sig.visibility, Visibility::Public);
    }

    #[test]
    fn private_primary_constructor() {
        let sig = top("class Token private constructor(val raw: String) {");
        assert_eq!(sig.visibility, Visibility::Public);
        assert_eq!(sig.constructor_visibility, Visibility::Private);
        assert_eq!(sig.constructor_params.as_deref(), Some("val raw: String"));
    }

    #[test]
    fn annotated_object() {
        let sig = top("@Suppress(\"unused\") object Registry {");
        assert_eq!(sig.kind, Some(SymbolKind::Object));
        assert_eq!(sig.name, "Registry");
    }

    #[test]
    fn fun_interface_is_a_container() {
        let sig = top("fun interface Action {");
        assert_eq!(sig.kind, Some(SymbolKind::Interface));
        assert_eq!(sig.name, "Action");
    }

    #[test]
    fn companion_object_is_not_a_container() {
        assert!(match_declaration(CONTAINER_MATCHERS, "companion object {").is_none());
        assert!(is_companion("    companion object Factory {"));
        assert!(!is_companion("object Factory {"));
    }

    #[test]
    fn anonymous_object_is_not_a_container() {
        assert!(match_declaration(TOP_LEVEL_MATCHERS, "val x = object : Runnable {").is_none());
    }

    #[test]
    fn function_remainder_stops_at_body() {
        let sig = member("override fun <T> convert(value: T, fallback: T = value): String {");
        assert_eq!(sig.kind, Some(SymbolKind::Function));
        assert_eq!(sig.name, "convert");
        assert_eq!(sig.type_parameter.as_deref(), Some("<T>"));
        assert_eq!(
            sig.raw_remainder.as_deref(),
            Some("(value: T, fallback: T = value): String")
        );
    }

    #[test]
    fn expression_function_remainder() {
        let sig = member("private fun twice(x: Int) = x * 2");
        assert_eq!(sig.visibility, Visibility::Private);
        assert_eq!(sig.raw_remainder.as_deref(), Some("(x: Int)"));
    }

    #[test]
    fn extension_function_keeps_receiver() {
        let sig = top("fun String.shout(): String = uppercase()");
        assert_eq!(sig.name, "String.shout");
        assert_eq!(sig.raw_remainder.as_deref(), Some("(): String"));
    }

    #[test]
    fn properties_distinguish_val_and_var() {
        let val = member("val size: Int = 0");
        assert_eq!(val.kind, Some(SymbolKind::Val));
        assert_eq!(val.raw_remainder.as_deref(), Some(": Int"));
        assert_eq!(val.raw_value.as_deref(), Some("0"));

        let var = member("protected lateinit var listener: Listener");
        assert_eq!(var.kind, Some(SymbolKind::Var));
        assert_eq!(var.visibility, Visibility::Protected);
        assert_eq!(var.raw_remainder.as_deref(), Some(": Listener"));
    }

    #[test]
    fn delegated_property_remainder() {
        let sig = member("val config: Config by lazy { load() }");
        assert_eq!(sig.raw_remainder.as_deref(), Some(": Config"));
        assert_eq!(sig.raw_value, None);
    }

    #[test]
    fn closing_brace_of_one_line_body_is_cut() {
        let sig = member("fun call(): Int }");
        assert_eq!(sig.raw_remainder.as_deref(), Some("(): Int"));

        let sig = member("val x = 1 }");
        assert_eq!(sig.raw_remainder, None);
        assert_eq!(sig.raw_value.as_deref(), Some("1"));

        let sig = member("var label: String }");
        assert_eq!(sig.raw_remainder.as_deref(), Some(": String"));
    }

    #[test]
    fn unicode_and_backtick_names() {
        let sig = top("class Ü(val ñ: Int)");
        assert_eq!(sig.name, "Ü");
        assert_eq!(sig.constructor_params.as_deref(), Some("val ñ: Int"));
        assert_eq!(parse_parameter("val ñ: Int").unwrap().name, "ñ");

        let sig = member("fun `adds two numbers`() {");
        assert_eq!(sig.name, "`adds two numbers`");
        assert_eq!(sig.raw_remainder.as_deref(), Some("()"));

        let sig = top("fun Ü.größe(): Int = 1");
        assert_eq!(sig.name, "Ü.größe");
    }

    #[test]
    fn secondary_constructor() {
        let sig = member("constructor(name: String) : this(name, 0) {");
        assert_eq!(sig.kind, Some(SymbolKind::Constructor));
        assert_eq!(sig.raw_remainder.as_deref(), Some("(name: String) : this(name, 0)"));
    }

    #[test]
    fn initializer_block() {
        let sig = member("init {");
        assert_eq!(sig.kind, Some(SymbolKind::Initializer));
        assert_eq!(sig.name, "init");
        assert!(match_declaration(MEMBER_MATCHERS, "initialize()").is_none());
    }

    #[test]
    fn enum_case_shapes() {
        let plain = match_declaration(ENUM_CASE_MATCHERS, "RED").unwrap();
        assert_eq!(plain.name, "RED");
        assert_eq!(plain.raw_value, None);

        let with_args = match_declaration(ENUM_CASE_MATCHERS, r##"GREEN("#0f0", 2)"##).unwrap();
        assert_eq!(with_args.raw_value.as_deref(), Some(r##""#0f0", 2"##));

        let literal = match_declaration(ENUM_CASE_MATCHERS, "BLUE = 3").unwrap();
        assert_eq!(literal.raw_value.as_deref(), Some("3"));

        assert!(match_declaration(ENUM_CASE_MATCHERS, "foo.bar()").is_none());
    }

    #[test]
    fn enum_stop_words() {
        assert!(is_enum_stop_word("    fun label() = name"));
        assert!(is_enum_stop_word("private val code: Int"));
        assert!(!is_enum_stop_word("    RED,"));
    }

    #[test]
    fn parameters_split_on_top_level_commas() {
        let parts = split_parameters("val a: Map<String, Int>, b: (Int, Int) -> Unit = { _, _ -> }, var c: Int");
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "val a: Map<String, Int>");
        assert_eq!(parts[2], "var c: Int");
    }

    #[test]
    fn parameter_disclosure() {
        let p = parse_parameter("private val secret: String").unwrap();
        assert!(!p.is_disclosed());
        let p = parse_parameter("val x: Int = 1").unwrap();
        assert!(p.is_disclosed());
        assert_eq!(p.remainder.as_deref(), Some(": Int = 1"));
        let p = parse_parameter("plain: Int").unwrap();
        assert_eq!(p.binding, None);
        assert!(!p.is_disclosed());
    }
}
