//! CQL type expression parser
//!
//! Accepts the type syntax used in CQL schemas: `int`, `text`,
//! `list<frozen<set<uuid>>>`, `map<text, int>`, `tuple<int, text>`,
//! `ks.address` for user-defined types and `'org.example.Type'` for
//! custom types. `frozen<...>` is accepted and dropped.

use std::str::FromStr;

use super::{DataType, PrimitiveType};
use crate::error::{CodecError, Result};

impl FromStr for PrimitiveType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        if name == "text" {
            return Ok(PrimitiveType::Varchar);
        }
        PrimitiveType::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| CodecError::TypeSyntax(format!("Unknown type name '{}'", s.trim())))
    }
}

impl FromStr for DataType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parser = Parser { input: s, pos: 0 };
        let data_type = parser.parse_type()?;
        parser.skip_whitespace();
        if parser.pos != s.len() {
            return Err(CodecError::TypeSyntax(format!(
                "Unexpected trailing input '{}' in '{}'",
                &s[parser.pos..],
                s
            )));
        }
        Ok(data_type)
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse_type(&mut self) -> Result<DataType> {
        self.skip_whitespace();

        if self.peek() == Some('\'') {
            return self.parse_custom();
        }

        let name = self.parse_identifier()?;

        if self.peek() == Some('.') {
            self.pos += 1;
            let type_name = self.parse_identifier()?;
            return Ok(DataType::Udt {
                keyspace: name.to_string(),
                name: type_name.to_string(),
                fields: Vec::new(),
            });
        }

        let lowered = name.to_ascii_lowercase();
        match lowered.as_str() {
            "frozen" => {
                let mut params = self.parse_parameters(1)?;
                Ok(params.remove(0))
            }
            "list" => {
                let mut params = self.parse_parameters(1)?;
                Ok(DataType::list(params.remove(0)))
            }
            "set" => {
                let mut params = self.parse_parameters(1)?;
                Ok(DataType::set(params.remove(0)))
            }
            "map" => {
                let mut params = self.parse_parameters(2)?;
                let value = params.remove(1);
                let key = params.remove(0);
                Ok(DataType::map(key, value))
            }
            "tuple" => Ok(DataType::Tuple(self.parse_parameter_list()?)),
            _ => Ok(DataType::Primitive(lowered.parse()?)),
        }
    }

    fn parse_custom(&mut self) -> Result<DataType> {
        self.pos += 1;
        let rest = &self.input[self.pos..];
        let end = rest.find('\'').ok_or_else(|| {
            CodecError::TypeSyntax(format!("Unterminated custom type in '{}'", self.input))
        })?;
        let class_name = rest[..end].to_string();
        self.pos += end + 1;
        Ok(DataType::Custom(class_name))
    }

    fn parse_parameters(&mut self, expected: usize) -> Result<Vec<DataType>> {
        let params = self.parse_parameter_list()?;
        if params.len() != expected {
            return Err(CodecError::TypeSyntax(format!(
                "Expected {} type parameter(s), got {} in '{}'",
                expected,
                params.len(),
                self.input
            )));
        }
        Ok(params)
    }

    fn parse_parameter_list(&mut self) -> Result<Vec<DataType>> {
        self.expect('<')?;
        let mut params = vec![self.parse_type()?];
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                    params.push(self.parse_type()?);
                }
                Some('>') => {
                    self.pos += 1;
                    return Ok(params);
                }
                _ => {
                    return Err(CodecError::TypeSyntax(format!(
                        "Expected ',' or '>' at offset {} in '{}'",
                        self.pos, self.input
                    )))
                }
            }
        }
    }

    fn parse_identifier(&mut self) -> Result<&'a str> {
        self.skip_whitespace();
        let rest = &self.input[self.pos..];
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(CodecError::TypeSyntax(format!(
                "Expected a type name at offset {} in '{}'",
                self.pos, self.input
            )));
        }
        self.pos += len;
        Ok(&rest[..len])
    }

    fn expect(&mut self, c: char) -> Result<()> {
        self.skip_whitespace();
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            Ok(())
        } else {
            Err(CodecError::TypeSyntax(format!(
                "Expected '{}' at offset {} in '{}'",
                c, self.pos, self.input
            )))
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }
}
