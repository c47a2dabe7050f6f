//! Destinations for captured byte windows.
//!
//! A [`Sink`] receives the bytes a [`Take`](crate::take::Take) consumed.
//! The adapters here write into caller-owned `RefCell`s so a grammar can be
//! built once from shared references and run many times.
//!
//! ```
//! use std::cell::RefCell;
//! use bynom::prelude::*;
//!
//! let year = RefCell::new(0_u32);
//! let rule = Rule::new().then(take(into::parsed(&year), digits()));
//! rule.eat(&Context::background(), &mut BytePlate::from("2024-")).unwrap();
//! assert_eq!(*year.borrow(), 2024);
//! ```

use std::{cell::RefCell, error::Error, str::FromStr};

use crate::error::ParseError;

pub trait Sink {
    fn accept(&self, window: &[u8]) -> Result<(), ParseError>;
}

impl<F> Sink for F
where
    F: Fn(&[u8]) -> Result<(), ParseError>,
{
    fn accept(&self, window: &[u8]) -> Result<(), ParseError> {
        self(window)
    }
}

/// Replaces the destination with a copy of the window.
#[derive(Debug)]
pub struct IntoBytes<'a>(&'a RefCell<Vec<u8>>);

/// Replaces the destination with the window, which must be UTF-8.
#[derive(Debug)]
pub struct IntoString<'a>(&'a RefCell<String>);

/// Parses the window with `FromStr` and stores the value.
#[derive(Debug)]
pub struct Parsed<'a, T>(&'a RefCell<T>);

/// Parses the window with `FromStr` and pushes the value.
#[derive(Debug)]
pub struct Append<'a, T>(&'a RefCell<Vec<T>>);

pub fn bytes(dest: &RefCell<Vec<u8>>) -> IntoBytes<'_> {
    IntoBytes(dest)
}

pub fn string(dest: &RefCell<String>) -> IntoString<'_> {
    IntoString(dest)
}

pub fn parsed<T: FromStr>(dest: &RefCell<T>) -> Parsed<'_, T> {
    Parsed(dest)
}

pub fn append<T: FromStr>(dest: &RefCell<Vec<T>>) -> Append<'_, T> {
    Append(dest)
}

fn utf8(window: &[u8]) -> Result<&str, ParseError> {
    std::str::from_utf8(window).map_err(ParseError::conversion)
}

fn parse<T>(window: &[u8]) -> Result<T, ParseError>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    utf8(window)?.parse::<T>().map_err(ParseError::conversion)
}

impl Sink for IntoBytes<'_> {
    fn accept(&self, window: &[u8]) -> Result<(), ParseError> {
        let mut dest = self.0.borrow_mut();
        dest.clear();
        dest.extend_from_slice(window);
        Ok(())
    }
}

impl Sink for IntoString<'_> {
    fn accept(&self, window: &[u8]) -> Result<(), ParseError> {
        let s = utf8(window)?;
        let mut dest = self.0.borrow_mut();
        dest.clear();
        dest.push_str(s);
        Ok(())
    }
}

impl<T> Sink for Parsed<'_, T>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    fn accept(&self, window: &[u8]) -> Result<(), ParseError> {
        *self.0.borrow_mut() = parse(window)?;
        Ok(())
    }
}

impl<T> Sink for Append<'_, T>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    fn accept(&self, window: &[u8]) -> Result<(), ParseError> {
        let value = parse(window)?;
        self.0.borrow_mut().push(value);
        Ok(())
    }
}
