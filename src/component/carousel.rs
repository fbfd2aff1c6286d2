/// Index state of an image carousel.
///
/// All navigation wraps modulo the photo count. An empty carousel stays at index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
    paused: bool,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            paused: false,
        }
    }

    /// Start at `index`, wrapping anything out of range back into the photo list
    pub fn starting_at(len: usize, index: usize) -> Self {
        let mut carousel = Self::new(len);
        if len > 0 {
            carousel.index = index % len;
        }
        carousel
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Jump straight to a photo (thumbnail or indicator click). Out-of-range picks are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }

    /// Autoplay step: advances unless paused or there is nothing to rotate through
    pub fn tick(&mut self) {
        if !self.paused && self.len > 1 {
            self.next();
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Index the "next" control points at, without moving
    pub fn peek_next(&self) -> usize {
        let mut carousel = *self;
        carousel.next();
        carousel.index
    }

    /// Index the "previous" control points at, without moving
    pub fn peek_prev(&self) -> usize {
        let mut carousel = *self;
        carousel.prev();
        carousel.index
    }
}
