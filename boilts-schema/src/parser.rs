//! Structural parser for Go model sources.
//!
//! Only the declarations SQLBoiler output relies on are understood: the
//! package clause, `type` declarations (single and grouped) and struct bodies.
//! Every other top-level declaration is skipped by bracket-balanced scanning.

use crate::error::ParseError;
use crate::lexer::{Token, TokenKind, tokenize};
use crate::types::{FieldDeclaration, ModelFile, StructDef, TypeAlias, TypeExpression};
use std::path::Path;

/// Parses a Go model source from a string.
///
/// # Arguments
/// * `src` - Go source text
///
/// # Returns
/// Parsed model file or parse error.
///
/// # Errors
/// Returns `ParseError` if the source cannot be tokenized or a declaration is
/// malformed.
pub fn parse_model_source(src: &str) -> Result<ModelFile, ParseError> {
    let tokens = tokenize(src)?;
    Parser::new(tokens).parse()
}

/// Parses a Go model source file.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn parse_model_file(path: &Path) -> Result<ModelFile, ParseError> {
    tracing::debug!("Parsing model file {}", path.display());
    let src = std::fs::read_to_string(path)?;
    parse_model_source(&src)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn parse(mut self) -> Result<ModelFile, ParseError> {
        let mut file = ModelFile::default();

        while let Some(tok) = self.peek() {
            if tok.is_separator() {
                self.pos += 1;
                continue;
            }
            if tok.is_ident("package") {
                self.pos += 1;
                file.package = self.expect_ident("package name")?.0;
            } else if tok.is_ident("type") {
                self.pos += 1;
                self.parse_type_decl(&mut file)?;
            } else {
                let skipped = self.collect_line()?;
                if skipped.is_empty() {
                    return Err(self.unbalanced_here());
                }
            }
        }

        tracing::debug!(
            "Parsed package {} with {} structs and {} named types",
            file.package,
            file.structs.len(),
            file.aliases.len()
        );
        Ok(file)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn skip_separators(&mut self) {
        while self.peek().is_some_and(Token::is_separator) {
            self.pos += 1;
        }
    }

    fn expect_ident(&mut self, expected: &str) -> Result<(String, usize), ParseError> {
        let tok = self.peek().ok_or_else(|| ParseError::eof(expected))?;
        match &tok.kind {
            TokenKind::Ident(name) => {
                let result = (name.clone(), tok.line);
                self.pos += 1;
                Ok(result)
            }
            other => Err(ParseError::unexpected(
                tok.line,
                expected,
                other.to_string(),
            )),
        }
    }

    fn unbalanced_here(&self) -> ParseError {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Punct(c),
                line,
            }) => ParseError::UnbalancedDelimiter {
                line: *line,
                delimiter: *c,
            },
            Some(tok) => ParseError::unexpected(tok.line, "declaration", tok.kind.to_string()),
            None => ParseError::eof("declaration"),
        }
    }

    /// Consumes tokens up to the next separator at bracket depth zero, or up
    /// to a closing bracket opened before this line, which is left in place.
    fn collect_line(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut open: Vec<char> = Vec::new();
        let mut out = Vec::new();

        while let Some(tok) = self.tokens.get(self.pos) {
            if open.is_empty() && tok.is_separator() {
                break;
            }
            if let TokenKind::Punct(c) = tok.kind {
                match c {
                    '(' | '[' | '{' => open.push(c),
                    ')' | ']' | '}' => match open.pop() {
                        None => break,
                        Some(o) if closer_for(o) == c => {}
                        Some(_) => {
                            return Err(ParseError::UnbalancedDelimiter {
                                line: tok.line,
                                delimiter: c,
                            });
                        }
                    },
                    _ => {}
                }
            }
            out.push(tok.clone());
            self.pos += 1;
        }

        if let Some(&o) = open.last() {
            return Err(ParseError::eof(format!("'{}'", closer_for(o))));
        }
        Ok(out)
    }

    fn parse_type_decl(&mut self, file: &mut ModelFile) -> Result<(), ParseError> {
        if !self.peek().is_some_and(|t| t.is_punct('(')) {
            return self.parse_type_spec(file);
        }

        self.pos += 1;
        loop {
            self.skip_separators();
            match self.peek() {
                None => return Err(ParseError::eof("')'")),
                Some(tok) if tok.is_punct(')') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => self.parse_type_spec(file)?,
            }
        }
    }

    fn parse_type_spec(&mut self, file: &mut ModelFile) -> Result<(), ParseError> {
        let (name, line) = self.expect_ident("type name")?;
        if self.peek().is_some_and(|t| t.is_punct('=')) {
            self.pos += 1;
        }

        let is_struct = self.peek().is_some_and(|t| t.is_ident("struct"))
            && self.peek_at(1).is_some_and(|t| t.is_punct('{'));
        if is_struct {
            self.pos += 2;
            let def = self.parse_struct_body(name, line)?;
            file.structs.push(def);
            return Ok(());
        }

        let tokens = self.collect_line()?;
        if tokens.is_empty() {
            let found = self
                .peek()
                .map_or_else(|| "end of input".to_string(), |t| t.kind.to_string());
            return Err(ParseError::unexpected(line, "type", found));
        }
        file.aliases.push(TypeAlias {
            name,
            ty: type_expression(&tokens),
            line,
        });
        Ok(())
    }

    fn parse_struct_body(&mut self, name: String, line: usize) -> Result<StructDef, ParseError> {
        let mut def = StructDef::new(name, line);

        loop {
            self.skip_separators();
            match self.peek() {
                None => return Err(ParseError::eof("'}'")),
                Some(tok) if tok.is_punct('}') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {}
            }

            let tokens = self.collect_line()?;
            if tokens.is_empty() {
                return Err(self.unbalanced_here());
            }
            push_fields(&mut def, tokens);
        }

        tracing::debug!(
            "Parsed struct {} with {} fields",
            def.name,
            def.fields.len()
        );
        Ok(def)
    }
}

/// Interprets one field line: `Names Type [tag]` or an embedded type.
fn push_fields(def: &mut StructDef, mut tokens: Vec<Token>) {
    let line = tokens[0].line;
    let tag = match tokens.last().map(|t| &t.kind) {
        Some(TokenKind::RawStr(text) | TokenKind::Str(text)) => Some(text.clone()),
        _ => None,
    };
    if tag.is_some() {
        tokens.pop();
    }

    let mut names = Vec::new();
    let mut idx = 0;
    loop {
        let Some(name) = tokens.get(idx).and_then(Token::ident) else {
            break;
        };
        match tokens.get(idx + 1) {
            Some(next) if next.is_punct(',') => {
                names.push(name.to_string());
                idx += 2;
            }
            Some(next) if !next.is_punct('.') => {
                names.push(name.to_string());
                idx += 1;
                break;
            }
            _ => break,
        }
    }

    let type_tokens = &tokens[idx..];
    if names.is_empty() || type_tokens.is_empty() {
        tracing::debug!(
            "Skipping embedded field {} in struct {}",
            render(&tokens),
            def.name
        );
        return;
    }

    let ty = type_expression(type_tokens);
    for name in names {
        let field = FieldDeclaration::new(name, ty.clone(), tag.clone()).at_line(line);
        def.add_field(field);
    }
}

/// Builds a type expression from the tokens of a type.
fn type_expression(tokens: &[Token]) -> TypeExpression {
    structured(tokens).unwrap_or_else(|| TypeExpression::Unsupported(render(tokens)))
}

fn structured(tokens: &[Token]) -> Option<TypeExpression> {
    match tokens {
        [star, rest @ ..] if star.is_punct('*') => structured(rest).map(TypeExpression::pointer),
        [name] => name.ident().map(TypeExpression::ident),
        [pkg, dot, selector] if dot.is_punct('.') => Some(TypeExpression::qualified(
            TypeExpression::ident(pkg.ident()?),
            selector.ident()?,
        )),
        _ => None,
    }
}

/// Renders tokens back into compact Go-like text.
fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev: Option<&TokenKind> = None;
    let mut pending_space = false;

    for tok in tokens {
        if tok.kind == TokenKind::Newline {
            pending_space = true;
            continue;
        }
        let wordy = |k: &TokenKind| matches!(k, TokenKind::Ident(_) | TokenKind::Number(_));
        let space = match prev {
            None => false,
            Some(TokenKind::Punct(',')) => true,
            Some(p) if wordy(&tok.kind) => wordy(p) || *p == TokenKind::Punct(')') || pending_space,
            Some(_) => pending_space && !tok.is_punct('}'),
        };
        if space {
            out.push(' ');
        }
        out.push_str(&tok.kind.to_string());
        prev = Some(&tok.kind);
        pending_space = false;
    }

    out
}

fn closer_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_MODEL: &str = r#"// Code generated by SQLBoiler 4.16.2. DO NOT EDIT.

package models

import (
	"context"
	"time"

	"github.com/friendsofgo/errors"
	"github.com/volatiletech/null/v8"
	"github.com/volatiletech/sqlboiler/v4/types"
)

// User is an object representing the database table.
type User struct {
	ID        int               `boil:"id" json:"id" toml:"id" yaml:"id"`
	Email     string            `boil:"email" json:"email" toml:"email" yaml:"email"`
	Nickname  null.String       `boil:"nickname" json:"nickname,omitempty" toml:"nickname" yaml:"nickname,omitempty"`
	Balance   types.Decimal     `boil:"balance" json:"balance" toml:"balance" yaml:"balance"`
	Tags      types.StringArray `boil:"tags" json:"tags,omitempty" toml:"tags" yaml:"tags,omitempty"`
	Avatar    []byte            `boil:"avatar" json:"avatar" toml:"avatar" yaml:"avatar"`
	Role      UserRole          `boil:"role" json:"role" toml:"role" yaml:"role"`
	CreatedAt time.Time         `boil:"created_at" json:"created_at" toml:"created_at" yaml:"created_at"`
	DeletedAt null.Time         `boil:"deleted_at" json:"deleted_at,omitempty" toml:"deleted_at" yaml:"deleted_at,omitempty"`

	R *userR `boil:"-" json:"-" toml:"-" yaml:"-"`
	L userL  `boil:"-" json:"-" toml:"-" yaml:"-"`
}

var UserColumns = struct {
	ID    string
	Email string
}{
	ID:    "id",
	Email: "email",
}

type UserRole string

const (
	UserRoleAdmin  UserRole = "admin"
	UserRoleMember UserRole = "member"
)

type (
	// UserSlice is an alias for a slice of pointers to User.
	UserSlice []*User
	// UserHook is the signature for custom User hook methods
	UserHook func(context.Context, boil.ContextExecutor, *User) error

	userQuery struct {
		*queries.Query
	}
)

// userR is where relationships are stored.
type userR struct {
	Posts PostSlice `boil:"Posts" json:"Posts" toml:"Posts" yaml:"Posts"`
}

func (o *User) Insert(ctx context.Context, exec boil.ContextExecutor, columns boil.Columns) error {
	if o == nil {
		return errors.New("models: no users provided for insertion")
	}
	currTime := time.Now().In(boil.GetLocation())
	_ = currTime
	return nil
}
"#;

    #[test]
    fn test_parse_package_and_structs() {
        let file = parse_model_source(USER_MODEL).expect("Failed to parse");

        assert_eq!(file.package, "models");
        let names: Vec<_> = file.structs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["User", "userQuery", "userR"]);
    }

    #[test]
    fn test_parse_field_types() {
        let file = parse_model_source(USER_MODEL).expect("Failed to parse");
        let user = file.get_struct("User").expect("User struct");

        assert_eq!(user.fields.len(), 11);
        let id = user.get_field("ID").expect("ID field");
        assert_eq!(id.ty, TypeExpression::ident("int"));
        assert_eq!(
            user.get_field("Nickname").unwrap().ty,
            TypeExpression::qualified(TypeExpression::ident("null"), "String")
        );
        assert_eq!(
            user.get_field("R").unwrap().ty,
            TypeExpression::pointer(TypeExpression::ident("userR"))
        );
        assert_eq!(
            user.get_field("Avatar").unwrap().ty,
            TypeExpression::Unsupported("[]byte".into())
        );
    }

    #[test]
    fn test_parse_field_tag_and_line() {
        let file = parse_model_source(USER_MODEL).expect("Failed to parse");
        let user = file.get_struct("User").unwrap();
        let created = user.get_field("CreatedAt").unwrap();

        assert_eq!(
            created.tag.as_deref(),
            Some(r#"`boil:"created_at" json:"created_at" toml:"created_at" yaml:"created_at"`"#)
        );
        assert_eq!(created.line, 23);
    }

    #[test]
    fn test_parse_named_types() {
        let file = parse_model_source(USER_MODEL).expect("Failed to parse");

        let string_types: Vec<_> = file.string_types().collect();
        assert_eq!(string_types, vec!["UserRole"]);

        let slice = file.aliases.iter().find(|a| a.name == "UserSlice").unwrap();
        assert_eq!(slice.ty, TypeExpression::Unsupported("[]*User".into()));

        let hook = file.aliases.iter().find(|a| a.name == "UserHook").unwrap();
        assert_eq!(
            hook.ty,
            TypeExpression::Unsupported(
                "func(context.Context, boil.ContextExecutor, *User) error".into()
            )
        );
    }

    #[test]
    fn test_embedded_fields_are_skipped() {
        let file = parse_model_source(USER_MODEL).expect("Failed to parse");
        let query = file.get_struct("userQuery").unwrap();
        assert!(query.fields.is_empty());
    }

    #[test]
    fn test_multi_name_field() {
        let src = "package m\ntype Point struct {\n\tX, Y float64 `boil:\"xy\"`\n}\n";
        let file = parse_model_source(src).expect("Failed to parse");
        let point = file.get_struct("Point").unwrap();

        assert_eq!(point.fields.len(), 2);
        assert_eq!(point.fields[1].name, "Y");
        assert_eq!(point.fields[1].tag.as_deref(), Some("`boil:\"xy\"`"));
    }

    #[test]
    fn test_single_line_struct() {
        let src = "package m\ntype Empty struct{}\ntype One struct { A int; B *string }\n";
        let file = parse_model_source(src).expect("Failed to parse");

        assert!(file.get_struct("Empty").unwrap().fields.is_empty());
        let one = file.get_struct("One").unwrap();
        assert_eq!(one.fields.len(), 2);
        assert_eq!(
            one.fields[1].ty,
            TypeExpression::pointer(TypeExpression::ident("string"))
        );
    }

    #[test]
    fn test_unclosed_struct() {
        let src = "package m\ntype User struct {\n\tID int\n";
        let err = parse_model_source(src).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_mismatched_delimiter() {
        let src = "package m\nfunc f() { g(] }\n";
        let err = parse_model_source(src).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnbalancedDelimiter {
                line: 2,
                delimiter: ']'
            }
        ));
    }

    #[test]
    fn test_stray_closer_at_top_level() {
        let err = parse_model_source("package m\n}\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnbalancedDelimiter {
                delimiter: '}',
                ..
            }
        ));
    }

    #[test]
    fn test_missing_type_name() {
        let err = parse_model_source("package m\ntype {\n").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_byte_order_mark_before_package() {
        let src = format!("\u{feff}{USER_MODEL}");
        let file = parse_model_source(&src).expect("Failed to parse");

        assert_eq!(file.package, "models");
        assert_eq!(file.structs.len(), 3);
    }

    #[test]
    fn test_parse_model_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("users.go");
        std::fs::write(&path, USER_MODEL).expect("write model");

        let file = parse_model_file(&path).expect("Failed to parse");
        assert_eq!(file.structs.len(), 3);

        let missing = parse_model_file(&dir.path().join("missing.go")).unwrap_err();
        assert!(matches!(missing, ParseError::Io(_)));
    }
}
