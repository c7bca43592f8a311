//! Asynchronous construction of a [`List`].
//!
//! All of the builders here are strictly sequential: each element is awaited
//! to completion before the next one is requested, so the finished list
//! always holds the elements in their declaration order, whatever their
//! individual latencies. Nothing runs concurrently and nothing is cancelled
//! mid-build.

use std::future::Future;

use futures::pin_mut;
use futures::stream::{Stream, StreamExt};

use crate::List;

impl<T> List<T> {
    /// Builds a `List` by draining a [`Stream`], appending each element as
    /// it resolves.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use futures::executor::block_on;
    /// use futures::stream;
    /// use std::iter::FromIterator;
    ///
    /// let list = block_on(List::from_stream(stream::iter([1, 2, 3])));
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3]);
    /// ```
    pub async fn from_stream<S>(stream: S) -> List<T>
    where
        S: Stream<Item = T>,
    {
        pin_mut!(stream);
        let mut list = List::new();
        while let Some(value) = stream.next().await {
            list.push_back(value);
        }
        list
    }

    /// Builds a `List` from a stream of fallible elements.
    ///
    /// The first `Err` stops the build: the partially built list is dropped
    /// and the error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use futures::executor::block_on;
    /// use futures::stream;
    ///
    /// let values = stream::iter([Ok(1), Ok(2), Err("boom"), Ok(3)]);
    /// let result: Result<List<i32>, &str> = block_on(List::try_from_stream(values));
    /// assert_eq!(result.unwrap_err(), "boom");
    /// ```
    pub async fn try_from_stream<S, E>(stream: S) -> Result<List<T>, E>
    where
        S: Stream<Item = Result<T, E>>,
    {
        pin_mut!(stream);
        let mut list = List::new();
        while let Some(value) = stream.next().await {
            list.push_back(value?);
        }
        Ok(list)
    }

    /// Builds a `List` from a finite collection of futures, awaiting each
    /// one to completion before polling the next.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::List;
    /// use futures::executor::block_on;
    /// use std::future::Future;
    /// use std::iter::FromIterator;
    /// use std::pin::Pin;
    ///
    /// let futures: Vec<Pin<Box<dyn Future<Output = i32>>>> = vec![
    ///     Box::pin(async { 1 }),
    ///     Box::pin(async { 2 }),
    ///     Box::pin(async { 3 }),
    /// ];
    /// let list = block_on(List::from_futures(futures));
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3]);
    /// ```
    pub async fn from_futures<I>(futures: I) -> List<T>
    where
        I: IntoIterator,
        I::Item: Future<Output = T>,
    {
        let mut list = List::new();
        for future in futures {
            list.push_back(future.await);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use futures::executor::block_on;
    use futures::stream;
    use std::future::Future;
    use std::iter::FromIterator;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use std::time::Duration;

    /// Resolves to `value` after sleeping `delay` on first poll.
    struct Delay<T> {
        value: Option<T>,
        delay: Duration,
    }

    impl<T> Delay<T> {
        fn millis(value: T, millis: u64) -> Self {
            Self {
                value: Some(value),
                delay: Duration::from_millis(millis),
            }
        }
    }

    impl<T: Unpin> Future for Delay<T> {
        type Output = T;

        fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<T> {
            std::thread::sleep(self.delay);
            match self.value.take() {
                Some(value) => Poll::Ready(value),
                None => panic!("Delay polled after completion"),
            }
        }
    }

    #[test]
    fn from_stream_preserves_order() {
        let list = block_on(List::from_stream(stream::iter(0..5)));
        assert_eq!(Vec::from_iter(list), vec![0, 1, 2, 3, 4]);

        let empty = block_on(List::<i32>::from_stream(stream::iter(Vec::new())));
        assert!(empty.is_empty());
    }

    #[test]
    fn try_from_stream_ok() {
        let values = stream::iter(vec![Ok::<_, String>(1), Ok(2), Ok(3)]);
        let list = block_on(List::try_from_stream(values)).unwrap();
        assert_eq!(Vec::from_iter(list), vec![1, 2, 3]);
    }

    #[test]
    fn try_from_stream_propagates_error() {
        let values = stream::iter(vec![Ok(1), Ok(2), Err("boom"), Ok(3)]);
        let result: Result<List<i32>, &str> = block_on(List::try_from_stream(values));
        assert_eq!(result.unwrap_err(), "boom");
    }

    #[test]
    fn from_futures_ignores_latency() {
        // The slowest future comes first; declaration order must win over
        // completion latency because each element is awaited in turn.
        let list = block_on(List::from_futures(vec![
            Delay::millis(1, 30),
            Delay::millis(2, 10),
            Delay::millis(3, 20),
        ]));
        assert_eq!(Vec::from_iter(list), vec![1, 2, 3]);
    }

    #[test]
    fn from_futures_empty() {
        let list = block_on(List::<i32>::from_futures(Vec::<Delay<i32>>::new()));
        assert!(list.is_empty());
    }
}
