//! Market token (cToken) interface definitions.
//!
//! Every market shares the [`ICToken`] surface. Markets whose underlying is an
//! ERC-20 token take amounts as arguments ([`ICErc20`]); the native-currency
//! market takes them as attached value ([`ICEther`]).

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface ICToken {
        function redeem(uint256 redeemTokens) external returns (uint256);
        function redeemUnderlying(uint256 redeemAmount) external returns (uint256);
        function borrow(uint256 borrowAmount) external returns (uint256);

        // Accrues interest, so these are state-changing but safe to eth_call.
        function balanceOfUnderlying(address owner) external returns (uint256);
        function borrowBalanceCurrent(address account) external returns (uint256);

        function balanceOf(address owner) external view returns (uint256);
    }
}

sol! {
    #[sol(rpc)]
    interface ICErc20 {
        function mint(uint256 mintAmount) external returns (uint256);
        function repayBorrow(uint256 repayAmount) external returns (uint256);
        function repayBorrowBehalf(address borrower, uint256 repayAmount) external returns (uint256);
    }
}

sol! {
    #[sol(rpc)]
    interface ICEther {
        function mint() external payable;
        function repayBorrow() external payable;
        function repayBorrowBehalf(address borrower) external payable;
    }
}
