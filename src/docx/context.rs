use std::collections::{HashMap, VecDeque};

use crate::model::{Association, Token};

pub const DEFAULT_WINDOW: usize = 5;

/// Captions each resolvable image with the text fragments that precede it.
///
/// The window holds the most recent non-empty fragments (oldest evicted first)
/// and is emptied after every association, so a fragment never captions two
/// images. Image tokens with an unknown relationship id leave it untouched.
pub struct ContextAssociator<'a> {
    rels: &'a HashMap<String, String>,
    capacity: usize,
    window: VecDeque<String>,
    associations: Vec<Association>,
}

impl<'a> ContextAssociator<'a> {
    pub fn new(rels: &'a HashMap<String, String>) -> Self {
        Self::with_window(rels, DEFAULT_WINDOW)
    }

    pub fn with_window(rels: &'a HashMap<String, String>, capacity: usize) -> Self {
        Self {
            rels,
            capacity,
            window: VecDeque::with_capacity(capacity + 1),
            associations: Vec::new(),
        }
    }

    pub fn push(&mut self, token: Token) {
        match token {
            Token::Text(text) => {
                if text.is_empty() {
                    return;
                }
                self.window.push_back(text);
                while self.window.len() > self.capacity {
                    self.window.pop_front();
                }
            }
            Token::Image(rid) => {
                let Some(filename) = self.rels.get(&rid) else {
                    log::debug!("Image reference {rid} has no image relationship — skipped");
                    return;
                };
                let context = self.window.drain(..).collect::<Vec<_>>().join(" ");
                self.associations.push(Association {
                    context,
                    asset_filename: filename.clone(),
                });
            }
        }
    }

    pub fn finish(self) -> Vec<Association> {
        self.associations
    }
}

pub fn associate(
    tokens: impl IntoIterator<Item = Token>,
    rels: &HashMap<String, String>,
) -> Vec<Association> {
    let mut associator = ContextAssociator::new(rels);
    for token in tokens {
        associator.push(token);
    }
    associator.finish()
}
