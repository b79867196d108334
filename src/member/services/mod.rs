//! Application services for member registration and login.

mod membership;

pub use membership::{
    LoginMember, LoginRequest, MemberService, MemberServiceError, MemberServiceResult,
    RegisterMemberRequest,
};
