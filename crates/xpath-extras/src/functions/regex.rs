use core::fmt;
use std::borrow::Cow;

use fancy_regex::{Expander, Regex, RegexBuilder};

use crate::coerce::CoercedArgs;
use crate::model::TreeNode;
use crate::runtime::{CallCtx, Error, RegexProvider};
use crate::value::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexFlags {
    pub ascii: bool,
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
}

/// Parse a flags argument. Letters are case-insensitive and may repeat.
pub fn parse_flags(flags: &str) -> Result<RegexFlags, Error> {
    let mut out = RegexFlags::default();
    for ch in flags.chars() {
        match ch.to_ascii_lowercase() {
            'a' => out.ascii = true,
            'i' => out.case_insensitive = true,
            'm' => out.multi_line = true,
            's' => out.dot_matches_new_line = true,
            _ => return Err(Error::UnknownFlag { flag: ch }),
        }
    }
    Ok(out)
}

/// Canonical form handed to providers: lowercase, each letter once.
impl fmt::Display for RegexFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (on, letter) in [
            (self.ascii, "a"),
            (self.case_insensitive, "i"),
            (self.multi_line, "m"),
            (self.dot_matches_new_line, "s"),
        ] {
            if on {
                f.write_str(letter)?;
            }
        }
        Ok(())
    }
}

const ASCII_WORD: &str = "0-9A-Za-z_";
const ASCII_DIGIT: &str = "0-9";
const ASCII_SPACE: &str = r"\t\n\x0B\x0C\r ";

/// Rewrite a pattern into the dialect fancy-regex compiles with the meaning
/// the flags give it: with `a`, Unicode-aware shorthand classes become their
/// ASCII counterparts; without `m`, `$` also matches before one trailing
/// newline.
fn translate(pattern: &str, flags: &RegexFlags) -> String {
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut class_depth = 0usize;
    let mut chars = pattern.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                let Some(esc) = chars.next() else {
                    out.push('\\');
                    break;
                };
                if flags.ascii {
                    push_ascii_escape(&mut out, esc, class_depth > 0);
                } else {
                    out.push('\\');
                    out.push(esc);
                }
            }
            '[' => {
                class_depth += 1;
                out.push('[');
                if class_depth == 1 {
                    // A leading `]` (after an optional `^`) is a literal.
                    if chars.peek() == Some(&'^') {
                        out.push('^');
                        chars.next();
                    }
                    if chars.peek() == Some(&']') {
                        out.push(']');
                        chars.next();
                    }
                }
            }
            ']' if class_depth > 0 => {
                class_depth -= 1;
                out.push(']');
            }
            '$' if class_depth == 0 && !flags.multi_line => out.push_str(r"(?=\n?\z)"),
            other => out.push(other),
        }
    }
    out
}

fn push_ascii_escape(out: &mut String, esc: char, inside_class: bool) {
    match (esc, inside_class) {
        ('w', false) => out.push_str(&format!("[{ASCII_WORD}]")),
        ('W', false) => out.push_str(&format!("[^{ASCII_WORD}]")),
        ('d', false) => out.push_str(&format!("[{ASCII_DIGIT}]")),
        ('D', false) => out.push_str(&format!("[^{ASCII_DIGIT}]")),
        ('s', false) => out.push_str(&format!("[{ASCII_SPACE}]")),
        ('S', false) => out.push_str(&format!("[^{ASCII_SPACE}]")),
        ('b', false) => out.push_str(&format!(
            "(?:(?<=[{ASCII_WORD}])(?![{ASCII_WORD}])|(?<![{ASCII_WORD}])(?=[{ASCII_WORD}]))"
        )),
        ('B', false) => out.push_str(&format!(
            "(?:(?<=[{ASCII_WORD}])(?=[{ASCII_WORD}])|(?<![{ASCII_WORD}])(?![{ASCII_WORD}]))"
        )),
        ('w', true) => out.push_str(ASCII_WORD),
        ('d', true) => out.push_str(ASCII_DIGIT),
        ('s', true) => out.push_str(ASCII_SPACE),
        ('W', true) => out.push_str(&format!("[^{ASCII_WORD}]")),
        ('D', true) => out.push_str(&format!("[^{ASCII_DIGIT}]")),
        ('S', true) => out.push_str(&format!("[^{ASCII_SPACE}]")),
        (other, _) => {
            out.push('\\');
            out.push(other);
        }
    }
}

/// Turn the character escapes a replacement template may carry (`\n`, `\t`,
/// `\r`, `\f`, `\v`, `\a`) into the characters themselves. `\\` and group
/// references are left for the expander.
fn unescape_template(template: &str) -> Cow<'_, str> {
    if !template.contains('\\') {
        return Cow::Borrowed(template);
    }
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0C'),
            Some('v') => out.push('\x0B'),
            Some('a') => out.push('\x07'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

fn next_boundary(text: &str, pos: usize) -> usize {
    text[pos..].chars().next().map_or(pos + 1, |c| pos + c.len_utf8())
}

/// Default provider on fancy-regex (backtracking, supports lookaround and
/// backreferences). Replacement templates use `\1` / `\g<name>` syntax.
/// With `i`, case folding is Unicode-wide even when `a` is set.
pub struct FancyRegexProvider;

impl FancyRegexProvider {
    fn build_with_flags(pattern: &str, flags: &str) -> Result<Regex, Error> {
        let flags = parse_flags(flags)?;
        let source = translate(pattern, &flags);
        tracing::debug!(pattern, %flags, "compiling regex");
        let mut builder = RegexBuilder::new(&source);
        builder
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_matches_new_line);
        Ok(builder.build()?)
    }
}

impl RegexProvider for FancyRegexProvider {
    fn matches(&self, pattern: &str, flags: &str, text: &str) -> Result<bool, Error> {
        let re = Self::build_with_flags(pattern, flags)?;
        Ok(re.is_match(text)?)
    }

    fn replace(
        &self,
        pattern: &str,
        flags: &str,
        text: &str,
        replacement: &str,
    ) -> Result<String, Error> {
        let re = Self::build_with_flags(pattern, flags)?;
        let template = unescape_template(replacement);
        let expander = Expander::python();
        expander
            .check(&template, &re)
            .map_err(|e| Error::regex(format!("invalid replacement template: {e}")))?;
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut pos = 0;
        let mut after_empty = false;
        while pos <= text.len() {
            let Some(caps) = re.captures_from_pos(text, pos)? else {
                break;
            };
            let Some(m) = caps.get(0) else { break };
            // An empty match may follow a non-empty one, never another empty one.
            if after_empty && m.start() == pos && m.end() == pos {
                pos = next_boundary(text, pos);
                after_empty = false;
                continue;
            }
            out.push_str(&text[last..m.start()]);
            expander.append_expansion(&mut out, &template, &caps);
            last = m.end();
            pos = m.end();
            after_empty = m.start() == m.end();
        }
        out.push_str(&text[last..]);
        Ok(out)
    }
}

fn provider<N>(ctx: &CallCtx<N>) -> &dyn RegexProvider {
    const FALLBACK: &FancyRegexProvider = &FancyRegexProvider;
    match ctx.regex.as_deref() {
        Some(p) => p,
        None => FALLBACK,
    }
}

/// `re-match(target, pattern[, flags])`: true when `pattern` occurs anywhere
/// in `target`.
pub(super) fn re_match<N: TreeNode>(
    ctx: &CallCtx<N>,
    args: CoercedArgs<N>,
) -> Result<Value<N>, Error> {
    let target = args.string(0)?;
    let pattern = args.string(1)?;
    let flags = parse_flags(args.opt_string(2)?.unwrap_or_default())?;
    let hit = provider(ctx).matches(pattern, &flags.to_string(), target)?;
    Ok(Value::Boolean(hit))
}

/// `re-sub(target, pattern, replacement[, flags])`: replace every
/// non-overlapping match.
pub(super) fn re_sub<N: TreeNode>(
    ctx: &CallCtx<N>,
    args: CoercedArgs<N>,
) -> Result<Value<N>, Error> {
    let target = args.string(0)?;
    let pattern = args.string(1)?;
    let replacement = args.string(2)?;
    let flags = parse_flags(args.opt_string(3)?.unwrap_or_default())?;
    let out = provider(ctx).replace(pattern, &flags.to_string(), target, replacement)?;
    Ok(Value::String(out))
}
