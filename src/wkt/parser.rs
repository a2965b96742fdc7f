use crate::error::WktError;

/// A value inside a WKT element.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum WktValue {
    Node(WktNode),
    Text(String),
    Number(f64),
    Keyword(String),
}

/// A WKT element: `KEYWORD[value, value, ...]`. Keywords are stored upper-case.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WktNode {
    pub(crate) keyword: String,
    pub(crate) values: Vec<WktValue>,
}

impl WktNode {
    /// The quoted string at position `idx`.
    pub(crate) fn text(&self, idx: usize) -> Option<&str> {
        match self.values.get(idx)? {
            WktValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The number at position `idx`.
    pub(crate) fn number(&self, idx: usize) -> Option<f64> {
        match self.values.get(idx)? {
            WktValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// The bare keyword (enumeration) at position `idx`, e.g. `NORTH` in `AXIS["Lat",NORTH]`.
    pub(crate) fn keyword_value(&self, idx: usize) -> Option<&str> {
        match self.values.get(idx)? {
            WktValue::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    #[inline] pub(crate) fn name(&self) -> Option<&str> { self.text(0) }

    /// All child elements, in order.
    pub(crate) fn nodes(&self) -> impl Iterator<Item = &WktNode> {
        self.values.iter().filter_map(|value| match value {
            WktValue::Node(node) => Some(node),
            _ => None,
        })
    }

    /// Child elements with the given keyword.
    pub(crate) fn children<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a WktNode> {
        self.nodes().filter(move |node| node.keyword == keyword)
    }

    /// The first child element whose keyword is one of `keywords`.
    pub(crate) fn child_any(&self, keywords: &[&str]) -> Option<&WktNode> {
        self.nodes().find(|node| keywords.contains(&node.keyword.as_str()))
    }

    #[inline]
    pub(crate) fn child(&self, keyword: &str) -> Option<&WktNode> {
        self.child_any(&[keyword])
    }
}

/// Deepest element nesting accepted. Real CRS descriptions stay well below this.
pub(crate) const MAX_DEPTH: usize = 64;

/// Parse WKT text into its element tree.
pub(crate) fn parse(text: &str) -> Result<WktNode, WktError> {
    let mut parser = Parser { text, pos: 0, depth: 0 };
    let node = parser.node()?;
    parser.skip_whitespace();
    if parser.pos < text.len() {
        return Err(WktError::TrailingCharacters(parser.pos));
    }
    Ok(node)
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    #[inline]
    fn peek(&self) -> Option<char> { self.text[self.pos..].chars().next() }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) { self.bump(); }
    }

    fn identifier(&mut self) -> Result<String, WktError> {
        self.skip_whitespace();
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') { self.bump(); }
        if start == self.pos {
            return match self.peek() {
                Some(found) => Err(WktError::UnexpectedChar { found, offset: self.pos }),
                None => Err(WktError::UnexpectedEnd("keyword")),
            };
        }
        Ok(self.text[start..self.pos].to_string())
    }

    /// `KEYWORD[...]` or `KEYWORD(...)`.
    fn node(&mut self) -> Result<WktNode, WktError> {
        let keyword = self.identifier()?.to_ascii_uppercase();
        self.skip_whitespace();
        let close = match self.bump() {
            Some('[') => ']',
            Some('(') => ')',
            Some(found) => return Err(WktError::UnexpectedChar { found, offset: self.pos - found.len_utf8() }),
            None => return Err(WktError::UnexpectedEnd("'[' or '('")),
        };
        self.node_body(keyword, close)
    }

    fn node_body(&mut self, keyword: String, close: char) -> Result<WktNode, WktError> {
        if self.depth >= MAX_DEPTH {
            return Err(WktError::TooDeep(self.pos));
        }
        self.depth += 1;
        let node = self.node_values(keyword, close);
        self.depth -= 1;
        node
    }

    fn node_values(&mut self, keyword: String, close: char) -> Result<WktNode, WktError> {
        let mut values = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(close) {
            self.bump();
            return Ok(WktNode { keyword, values });
        }

        loop {
            values.push(self.value()?);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => break,
                Some(found) => return Err(WktError::UnexpectedChar { found, offset: self.pos - found.len_utf8() }),
                None => return Err(WktError::UnexpectedEnd("',' or closing bracket")),
            }
        }

        Ok(WktNode { keyword, values })
    }

    fn value(&mut self) -> Result<WktValue, WktError> {
        self.skip_whitespace();
        match self.peek() {
            Some('"') => self.quoted().map(WktValue::Text),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.number().map(WktValue::Number),
            Some(c) if c.is_ascii_alphabetic() => {
                let word = self.identifier()?;
                self.skip_whitespace();
                match self.peek() {
                    Some('[') => { self.bump(); self.node_body(word.to_ascii_uppercase(), ']').map(WktValue::Node) }
                    Some('(') => { self.bump(); self.node_body(word.to_ascii_uppercase(), ')').map(WktValue::Node) }
                    _ => Ok(WktValue::Keyword(word)),
                }
            }
            Some(found) => Err(WktError::UnexpectedChar { found, offset: self.pos }),
            None => Err(WktError::UnexpectedEnd("value")),
        }
    }

    /// A double-quoted string; `""` inside stands for one quote.
    fn quoted(&mut self) -> Result<String, WktError> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') if self.peek() == Some('"') => { self.bump(); out.push('"'); }
                Some('"') => return Ok(out),
                Some(c) => out.push(c),
                None => return Err(WktError::UnterminatedString(start)),
            }
        }
    }

    fn number(&mut self) -> Result<f64, WktError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')) {
            self.bump();
        }
        let literal = &self.text[start..self.pos];
        literal.parse().map_err(|_| WktError::InvalidValue {
            what: "number".to_string(),
            value: literal.to_string(),
        })
    }
}
