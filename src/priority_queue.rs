//! A binary min-heap keyed by an explicit priority.
//!
//! Unlike [std::collections::BinaryHeap] this queue supports changing the priority of an element
//! that is already enqueued. Equal priorities are resolved by the heap mechanics alone, so the
//! order in which tied elements come out is not the order they went in.
use crate::Cost;

#[derive(Clone, Debug)]
struct HeapEntry<T, P> {
    element: T,
    priority: P,
}

#[derive(Clone, Debug)]
pub struct PriorityQueue<T, P = Cost> {
    heap: Vec<HeapEntry<T, P>>,
}

impl<T, P> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        PriorityQueue { heap: Vec::new() }
    }
}

impl<T: PartialEq, P: PartialOrd + Copy> PriorityQueue<T, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PriorityQueue {
            heap: Vec::with_capacity(capacity),
        }
    }

    pub fn enqueue(&mut self, element: T, priority: P) {
        self.heap.push(HeapEntry { element, priority });
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes and returns the element with the lowest priority.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let min = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(min.element)
    }

    pub fn peek(&self) -> Option<(&T, P)> {
        self.heap.first().map(|e| (&e.element, e.priority))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn contains(&self, element: &T) -> bool {
        self.heap.iter().any(|e| e.element == *element)
    }

    /// Changes the priority of the first entry equal to `element`, if there is one. The lookup is
    /// a linear scan.
    pub fn update_priority(&mut self, element: &T, priority: P) {
        let Some(index) = self.heap.iter().position(|e| e.element == *element) else {
            return;
        };
        let old_priority = self.heap[index].priority;
        self.heap[index].priority = priority;
        if priority < old_priority {
            self.sift_up(index);
        } else {
            self.sift_down(index);
        }
    }

    /// Moves the entry at `index` towards the root while its parent has a strictly greater
    /// priority.
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !(self.heap[index].priority < self.heap[parent].priority) {
                break;
            }
            self.heap.swap(index, parent);
            index = parent;
        }
    }

    /// Moves the entry at `index` towards the leaves, swapping with the smaller child while that
    /// child has a strictly smaller priority.
    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;
            if left < len && self.heap[left].priority < self.heap[smallest].priority {
                smallest = left;
            }
            if right < len && self.heap[right].priority < self.heap[smallest].priority {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.heap.swap(index, smallest);
            index = smallest;
        }
    }
}
