use std::marker::PhantomData;

/// Shared view over the score buffer used while one diagonal is in flight.
///
/// Workers read cells of the two previous diagonals and write the cells of the current one.
/// Every worker is handed distinct rows, and `j = diag - i` makes the written cells distinct,
/// so no cell is written twice or read while written.
#[derive(Debug)]
pub(crate) struct ThreadSlice<'a> {
    scores: *mut i32,
    len: usize,
    cols: usize,
    _marker: PhantomData<&'a mut [i32]>,
}

unsafe impl Send for ThreadSlice<'_> {}
unsafe impl Sync for ThreadSlice<'_> {}

impl<'a> ThreadSlice<'a> {
    pub fn new(scores: &'a mut [i32], cols: usize) -> Self {
        ThreadSlice {
            scores: scores.as_mut_ptr(),
            len: scores.len(),
            cols,
            _marker: PhantomData,
        }
    }

    /// # Safety
    /// No other worker may be writing `(i, j)` concurrently.
    #[inline(always)]
    pub unsafe fn get(&self, i: usize, j: usize) -> i32 {
        let idx = i * self.cols + j;
        debug_assert!(idx < self.len);
        unsafe { self.scores.add(idx).read() }
    }

    /// # Safety
    /// `(i, j)` must be owned by the calling worker for the current diagonal.
    #[inline(always)]
    pub unsafe fn set(&self, i: usize, j: usize, score: i32) {
        let idx = i * self.cols + j;
        debug_assert!(idx < self.len);
        unsafe { self.scores.add(idx).write(score) };
    }
}
