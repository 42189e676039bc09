// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Generic copy/duplicate/paste buffer.
//!
//! The buffer stores structural copies, never live references, and paste is
//! non-destructive so repeated pastes are supported. Identifier remapping is
//! delegated to the caller (the facade feeds the id generator), keeping the
//! buffer generic over any item shape that carries an id and a position.

/// Fixed positional offset applied to pasted items so they are visually
/// distinguishable from the originals.
pub const PASTE_OFFSET: (f64, f64) = (40.0, 40.0);

/// An item the clipboard can hold: cloneable, with a translatable position.
pub trait ClipboardItem: Clone {
    fn shift(&mut self, dx: f64, dy: f64);
}

#[derive(Debug, Clone)]
pub struct Clipboard<T> {
    items: Vec<T>,
}

impl<T> Default for Clipboard<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: ClipboardItem> Clipboard<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Replaces the buffer with structural copies of `items`.
    pub fn copy(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Produces pasteable copies of the buffered items without consuming the
    /// buffer. Each copy is offset by [`PASTE_OFFSET`] and passed through
    /// `remap`, which must assign it a fresh identifier.
    pub fn paste_with<F>(&self, mut remap: F) -> Vec<T>
    where
        F: FnMut(T) -> T,
    {
        self.items
            .iter()
            .map(|item| {
                let mut copy = item.clone();
                copy.shift(PASTE_OFFSET.0, PASTE_OFFSET.1);
                remap(copy)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clipboard, ClipboardItem, PASTE_OFFSET};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        x: f64,
        y: f64,
    }

    impl ClipboardItem for Item {
        fn shift(&mut self, dx: f64, dy: f64) {
            self.x += dx;
            self.y += dy;
        }
    }

    #[test]
    fn paste_offsets_and_remaps_without_consuming_the_buffer() {
        let mut clipboard = Clipboard::new();
        clipboard.copy(vec![Item {
            id: 1,
            x: 10.0,
            y: 20.0,
        }]);

        let mut next_id = 100;
        let mut paste = || {
            clipboard.paste_with(|mut item| {
                item.id = next_id;
                next_id += 1;
                item
            })
        };

        let first = paste();
        let second = paste();

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, 100);
        assert_eq!(second[0].id, 101);
        assert_eq!(first[0].x, 10.0 + PASTE_OFFSET.0);
        assert_eq!(second[0].y, 20.0 + PASTE_OFFSET.1);
        assert_eq!(clipboard.len(), 1);
    }

    #[test]
    fn empty_buffer_pastes_nothing() {
        let clipboard: Clipboard<Item> = Clipboard::new();
        assert!(clipboard.is_empty());
        assert!(clipboard.paste_with(|item| item).is_empty());
    }

    #[test]
    fn copy_replaces_previous_contents() {
        let mut clipboard = Clipboard::new();
        clipboard.copy(vec![
            Item {
                id: 1,
                x: 0.0,
                y: 0.0,
            },
            Item {
                id: 2,
                x: 0.0,
                y: 0.0,
            },
        ]);
        clipboard.copy(vec![Item {
            id: 3,
            x: 0.0,
            y: 0.0,
        }]);
        assert_eq!(clipboard.len(), 1);

        clipboard.clear();
        assert!(clipboard.is_empty());
    }
}
