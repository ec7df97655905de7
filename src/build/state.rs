//! Builder typestates.

/// Start of URI reference.
pub struct Start(());
/// End of scheme.
pub struct SchemeEnd(());
/// Start of authority.
pub struct AuthorityStart(());
/// End of userinfo.
pub struct UserinfoEnd(());
/// End of host.
pub struct HostEnd(());
/// End of port.
pub struct PortEnd(());
/// End of authority.
pub struct AuthorityEnd(());
/// End of path.
pub struct PathEnd(());
/// End of query.
pub struct QueryEnd(());
/// End of fragment.
pub struct FragmentEnd(());
/// End of URI reference.
pub struct End(());

/// Indicates that a component ending in `T` may follow the current state.
pub trait To<T> {}

/// Indicates that the current state may advance to `T`, skipping
/// the optional components in between.
pub trait AdvanceTo<T> {}

macro_rules! impl_to {
    ($($x:ty => $($y:ty),+;)+) => {
        $($(
            impl To<$y> for $x {}
        )+)+
    };
}

macro_rules! impl_advance_to {
    ($($x:ty => $($y:ty),+;)+) => {
        $($(
            impl AdvanceTo<$y> for $x {}
        )+)+
    };
}

impl_to! {
    Start => SchemeEnd, AuthorityStart, AuthorityEnd, PathEnd;
    SchemeEnd => AuthorityStart, AuthorityEnd, PathEnd;
    AuthorityStart => UserinfoEnd, HostEnd;
    UserinfoEnd => HostEnd;
    HostEnd => PortEnd, AuthorityEnd;
    PortEnd => AuthorityEnd;
    AuthorityEnd => PathEnd;
    PathEnd => QueryEnd, FragmentEnd, End;
    QueryEnd => FragmentEnd, End;
    FragmentEnd => End;
}

impl_advance_to! {
    Start => SchemeEnd, AuthorityEnd, PathEnd, QueryEnd, FragmentEnd;
    SchemeEnd => AuthorityEnd, PathEnd, QueryEnd, FragmentEnd;
    AuthorityStart => UserinfoEnd;
    HostEnd => PortEnd;
    AuthorityEnd => PathEnd, QueryEnd, FragmentEnd;
    PathEnd => QueryEnd, FragmentEnd;
    QueryEnd => FragmentEnd;
}
