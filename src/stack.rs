#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackUnderflow;

/// LIFO container shared by the postfix converter, the evaluator and the
/// executor's block stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: vec![] }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Result<T, StackUnderflow> {
        self.items.pop().ok_or(StackUnderflow)
    }

    pub fn peek(&self) -> Result<&T, StackUnderflow> {
        self.items.last().ok_or(StackUnderflow)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
