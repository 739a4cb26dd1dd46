//! Decomposition of raw symbol names into package, receiver type and function.
//!
//! Two families of identifiers are understood:
//!
//! - Dotted, slash-qualified names such as `mod/pkg.Foo`,
//!   `mod/pkg.(*Thing).Method` and `main.Foo`.
//! - Rust paths as produced by the symbol demangler, such as
//!   `my_crate::module::Thing::method`, `<my_crate::Thing as core::fmt::Display>::fmt`
//!   and `my_crate::outer::{{closure}}`.
//!
//! Parsing never fails. Anything the grammar does not recognise degrades to a
//! partially populated [`Symbol`].

/// The structured parts of a symbol name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Symbol {
    /// Package (module path) the symbol lives in
    pub package: String,
    /// Receiver type for methods, empty for free functions
    pub receiver_type: String,
    /// Function or method name
    pub function: String,
}

/// Split a raw symbol name into its package, receiver type and function.
///
/// # Examples
///
/// ```
/// use herror_stack::parse_symbol;
///
/// let symbol = parse_symbol("mod/pkg.(*Thing).Method");
/// assert_eq!(symbol.package, "mod/pkg");
/// assert_eq!(symbol.receiver_type, "Thing");
/// assert_eq!(symbol.function, "Method");
///
/// let symbol = parse_symbol("my_app::jobs::Runner::start");
/// assert_eq!(symbol.package, "my_app::jobs");
/// assert_eq!(symbol.receiver_type, "Runner");
/// assert_eq!(symbol.function, "start");
/// ```
pub fn parse_symbol(raw: &str) -> Symbol {
    if raw.contains("::") {
        parse_path(strip_hash(raw))
    } else {
        parse_dotted(raw)
    }
}

fn parse_dotted(name: &str) -> Symbol {
    if let (Some(open), Some(close)) = (name.rfind(".("), name.rfind(").")) {
        if close >= open + 2 {
            let receiver = &name[open + 2..close];
            return Symbol {
                package: name[..open].to_string(),
                receiver_type: receiver.strip_prefix('*').unwrap_or(receiver).to_string(),
                function: name[close + 2..].to_string(),
            };
        }
    }

    if let Some(slash) = name.rfind('/') {
        let prefix = &name[..slash];
        let tail = &name[slash + 1..];
        return match tail.find('.') {
            Some(dot) => Symbol {
                package: format!("{}/{}", prefix, &tail[..dot]),
                function: tail[dot + 1..].to_string(),
                ..Default::default()
            },
            None => Symbol {
                package: prefix.to_string(),
                function: tail.to_string(),
                ..Default::default()
            },
        };
    }

    match name.rfind('.') {
        Some(dot) => Symbol {
            package: name[..dot].to_string(),
            function: name[dot + 1..].to_string(),
            ..Default::default()
        },
        None => Symbol {
            function: name.to_string(),
            ..Default::default()
        },
    }
}

fn parse_path(name: &str) -> Symbol {
    let segments = split_top_level(name);
    let Some((head, rest)) = segments.split_first() else {
        return Symbol::default();
    };

    if let Some(inner) = head.strip_prefix('<').and_then(|h| h.strip_suffix('>')) {
        return parse_qualified(inner, rest);
    }

    let type_at = segments
        .iter()
        .position(|segment| segment.starts_with(|c: char| c.is_ascii_uppercase()));

    match type_at {
        Some(at) if at + 1 < segments.len() => Symbol {
            package: segments[..at].join("::"),
            receiver_type: strip_generics(segments[at]).to_string(),
            function: segments[at + 1..].join("::"),
        },
        _ => {
            // Closures and shims hang off the last plain identifier.
            let at = segments
                .iter()
                .rposition(|segment| !segment.starts_with('{'))
                .unwrap_or(0);
            Symbol {
                package: segments[..at].join("::"),
                receiver_type: String::new(),
                function: segments[at..].join("::"),
            }
        }
    }
}

/// Handles `<Self as Trait>::rest` and `<Self>::rest`.
fn parse_qualified(inner: &str, rest: &[&str]) -> Symbol {
    let (self_ty, trait_path) = match find_top_level(inner, " as ") {
        Some(at) => (&inner[..at], Some(&inner[at + 4..])),
        None => (inner, None),
    };
    let self_ty = strip_reference(self_ty);
    let function = rest.join("::");

    // Function pointers, tuples, slices and trait objects have no module.
    if !is_plain_path(self_ty) {
        return Symbol {
            package: trait_path.map(module_of).unwrap_or_default(),
            receiver_type: String::new(),
            function,
        };
    }

    let self_segments = split_top_level(self_ty);
    let receiver = self_segments
        .last()
        .map(|last| strip_generics(last))
        .unwrap_or_default();

    let package = if self_segments.len() > 1 {
        module_of(self_ty)
    } else {
        // Primitive or bare generic receivers borrow the trait's module.
        trait_path.map(module_of).unwrap_or_default()
    };

    Symbol {
        package,
        receiver_type: receiver.to_string(),
        function,
    }
}

/// Every top-level segment of `path` but the last.
fn module_of(path: &str) -> String {
    let segments = split_top_level(path);
    segments[..segments.len().saturating_sub(1)].join("::")
}

/// True for `a::b::Type<..>` shaped types, false for `fn(..) -> T`, `(A, B)`,
/// `[T]` and `Trait + Send`.
fn is_plain_path(ty: &str) -> bool {
    ty.starts_with(|c: char| c.is_alphabetic() || c == '_')
        && !ty.starts_with("fn(")
        && [" ", "(", "+", "["]
            .iter()
            .all(|needle| find_top_level(ty, needle).is_none())
}

/// Drops the `::h0123456789abcdef` suffix of legacy-mangled names.
fn strip_hash(name: &str) -> &str {
    match name.rsplit_once("::") {
        Some((head, hash))
            if hash.len() == 17
                && hash.starts_with('h')
                && hash[1..].chars().all(|c| c.is_ascii_hexdigit()) =>
        {
            head
        }
        _ => name,
    }
}

fn strip_reference(ty: &str) -> &str {
    let mut ty = ty.trim();
    for prefix in ["&mut ", "&", "*const ", "*mut ", "dyn "] {
        if let Some(stripped) = ty.strip_prefix(prefix) {
            ty = stripped.trim_start();
        }
    }
    ty
}

fn strip_generics(segment: &str) -> &str {
    match segment.find('<') {
        Some(0) | None => segment,
        Some(at) => &segment[..at],
    }
}

/// Splits on `::` that are not nested inside `<...>`.
fn split_top_level(path: &str) -> Vec<&str> {
    let bytes = path.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            // `->` in function pointer types is not a closing bracket
            b'>' if i == 0 || bytes[i - 1] != b'-' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&path[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&path[start..]);
    segments
}

fn find_top_level(haystack: &str, needle: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let mut depth = 0usize;
    for (i, &byte) in bytes.iter().enumerate() {
        match byte {
            b'<' => depth += 1,
            b'>' if i == 0 || bytes[i - 1] != b'-' => depth = depth.saturating_sub(1),
            _ if depth == 0
                && haystack.is_char_boundary(i)
                && haystack[i..].starts_with(needle) =>
            {
                return Some(i);
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(raw: &str) -> (String, String, String) {
        let symbol = parse_symbol(raw);
        (symbol.package, symbol.receiver_type, symbol.function)
    }

    fn owned(package: &str, receiver: &str, function: &str) -> (String, String, String) {
        (package.to_string(), receiver.to_string(), function.to_string())
    }

    #[test]
    fn slash_qualified_function() {
        assert_eq!(parts("mod/pkg.Foo"), owned("mod/pkg", "", "Foo"));
        assert_eq!(
            parts("git.sr.ht/kit/herror_test.TestStacktrace.func1"),
            owned("git.sr.ht/kit/herror_test", "", "TestStacktrace.func1")
        );
    }

    #[test]
    fn method_on_pointer_and_value_receivers() {
        assert_eq!(
            parts("mod/pkg.(*Thing).Method"),
            owned("mod/pkg", "Thing", "Method")
        );
        assert_eq!(
            parts("mod/pkg.(Thing).Method"),
            owned("mod/pkg", "Thing", "Method")
        );
        assert_eq!(parts("main.(*Thing).Run"), owned("main", "Thing", "Run"));
    }

    #[test]
    fn entry_package_without_separator() {
        assert_eq!(parts("main.Foo"), owned("main", "", "Foo"));
        assert_eq!(parts("runtime.Callers"), owned("runtime", "", "Callers"));
    }

    #[test]
    fn bare_identifier_becomes_function() {
        assert_eq!(parts("start_thread"), owned("", "", "start_thread"));
        assert_eq!(parts(""), owned("", "", ""));
    }

    #[test]
    fn rust_free_function() {
        assert_eq!(
            parts("stacktrace_test::trace"),
            owned("stacktrace_test", "", "trace")
        );
        assert_eq!(
            parts("std::rt::lang_start_internal"),
            owned("std::rt", "", "lang_start_internal")
        );
    }

    #[test]
    fn rust_closure_keeps_enclosing_function() {
        assert_eq!(
            parts("my_app::outer::{{closure}}"),
            owned("my_app", "", "outer::{{closure}}")
        );
        assert_eq!(
            parts("my_app::Worker::run::{{closure}}::{{closure}}"),
            owned("my_app", "Worker", "run::{{closure}}::{{closure}}")
        );
    }

    #[test]
    fn rust_inherent_method_with_generics() {
        assert_eq!(
            parts("my_app::store::Cache<K,V>::insert"),
            owned("my_app::store", "Cache", "insert")
        );
        assert_eq!(
            parts("core::ops::function::FnOnce::call_once"),
            owned("core::ops::function", "FnOnce", "call_once")
        );
    }

    #[test]
    fn rust_trait_impl() {
        assert_eq!(
            parts("<my_app::Thing as core::fmt::Display>::fmt"),
            owned("my_app", "Thing", "fmt")
        );
        assert_eq!(
            parts("<alloc::boxed::Box<F,A> as core::ops::function::FnOnce<Args>>::call_once"),
            owned("alloc::boxed", "Box", "call_once")
        );
        assert_eq!(
            parts("<&mut my_app::Reader as std::io::Read>::read"),
            owned("my_app", "Reader", "read")
        );
    }

    #[test]
    fn rust_primitive_receiver_borrows_trait_module() {
        assert_eq!(
            parts("<i32 as core::fmt::Display>::fmt"),
            owned("core::fmt", "i32", "fmt")
        );
    }

    #[test]
    fn rust_function_pointer_receiver_borrows_trait_module() {
        assert_eq!(
            parts(
                "<fn() -> core::result::Result<(), alloc::string::String> as core::ops::function::FnOnce<()>>::call_once"
            ),
            owned("core::ops::function", "", "call_once")
        );
        assert_eq!(
            parts("<(A, B) as core::fmt::Debug>::fmt"),
            owned("core::fmt", "", "fmt")
        );
        assert_eq!(
            parts("<[T] as alloc::slice::hack::ConvertVec>::to_vec"),
            owned("alloc::slice::hack", "", "to_vec")
        );
        assert_eq!(
            parts("<dyn core::ops::function::Fn<(&T,)> + Send as my_app::Hook>::call"),
            owned("my_app", "", "call")
        );
    }

    #[test]
    fn rust_hash_suffix_is_dropped() {
        assert_eq!(
            parts("my_app::run::h0123456789abcdef"),
            owned("my_app", "", "run")
        );
        // Not a hash: wrong length
        assert_eq!(parts("my_app::hello"), owned("my_app", "", "hello"));
    }

    #[test]
    fn rust_tuple_constructor_is_a_function() {
        assert_eq!(parts("my_app::Wrapper"), owned("my_app", "", "Wrapper"));
    }
}
